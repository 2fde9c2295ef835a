use std::fmt;

use chrono::NaiveDate;

const FALLBACK_NAME: &str = "A Team 21 AI Enthusiast";
const CHALLENGE_TITLE: &str = "AI Prompt Engineering Challenge";

/// `round(score / total * 100)`, rounding halves up. `None` for an empty quiz.
pub fn percentage(score: usize, total: usize) -> Option<usize> {
    if total == 0 {
        return None;
    }
    Some((score * 200 + total) / (total * 2))
}

/// Printable completion certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub participant_name: String,
    pub score: usize,
    pub total_questions: usize,
    pub program_director: String,
    pub completed_on: NaiveDate,
}

impl Certificate {
    pub fn new(
        participant_name: &str,
        score: usize,
        total_questions: usize,
        program_director: &str,
    ) -> Self {
        Self {
            participant_name: participant_name.to_string(),
            score,
            total_questions,
            program_director: program_director.to_string(),
            completed_on: chrono::Local::now().date_naive(),
        }
    }

    pub fn percentage(&self) -> Option<usize> {
        percentage(self.score, self.total_questions)
    }

    fn display_name(&self) -> &str {
        let name = self.participant_name.trim();
        if name.is_empty() {
            FALLBACK_NAME
        } else {
            name
        }
    }
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percentage = match self.percentage() {
            Some(p) => format!("{}%", p),
            None => "-".to_string(),
        };

        writeln!(f, "CERTIFICATE OF COMPLETION")?;
        writeln!(f)?;
        writeln!(f, "This certificate is proudly presented to")?;
        writeln!(f)?;
        writeln!(f, "    {}", self.display_name())?;
        writeln!(f)?;
        writeln!(f, "for successfully completing the")?;
        writeln!(f, "{}", CHALLENGE_TITLE)?;
        writeln!(f)?;
        writeln!(f, "With a final score of {}", percentage)?;
        writeln!(
            f,
            "({} out of {} correct)",
            self.score, self.total_questions
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.program_director)?;
        writeln!(f, "Program Director, Team 21 Academy")?;
        writeln!(f)?;
        writeln!(f, "{}", self.completed_on.format("%Y-%m-%d"))?;
        write!(f, "Date of Completion")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_bounds() {
        for total in 1..=50 {
            assert_eq!(percentage(0, total), Some(0));
            assert_eq!(percentage(total, total), Some(100));
        }
    }

    #[test]
    fn percentage_rounds_like_math_round() {
        assert_eq!(percentage(3, 5), Some(60));
        assert_eq!(percentage(1, 3), Some(33));
        assert_eq!(percentage(2, 3), Some(67));
        assert_eq!(percentage(1, 8), Some(13)); // 12.5
        assert_eq!(percentage(1, 200), Some(1)); // 0.5
    }

    #[test]
    fn empty_quiz_has_no_percentage() {
        assert_eq!(percentage(0, 0), None);
    }

    fn sample(name: &str) -> Certificate {
        Certificate {
            participant_name: name.to_string(),
            score: 3,
            total_questions: 5,
            program_director: "Jane Doe".to_string(),
            completed_on: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
        }
    }

    #[test]
    fn renders_summary() {
        let text = sample("Ada").to_string();
        assert!(text.contains("    Ada\n"));
        assert!(text.contains("With a final score of 60%"));
        assert!(text.contains("(3 out of 5 correct)"));
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("2024-05-17"));
    }

    #[test]
    fn blank_name_uses_fallback() {
        let text = sample("  ").to_string();
        assert!(text.contains(FALLBACK_NAME));
    }

    #[test]
    fn zero_total_does_not_panic() {
        let mut cert = sample("Ada");
        cert.score = 0;
        cert.total_questions = 0;
        assert!(cert.to_string().contains("With a final score of -"));
    }
}
