use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup, KeyboardRemove},
};

use super::{certificate, AppContext, ChatDialogue, ChatState, HandlerResult};
use crate::quiz::{QuizEngine, QuizPhase};

const NEXT_QUESTION: &str = "Next Question";
const FINISH_QUIZ: &str = "Finish Quiz";

const NAME_PROMPT: &str = "AI Prompt Engineering Quiz\n\n\
Test your knowledge of prompt engineering. \
First, please enter your name to be displayed on the certificate.";

pub async fn show(bot: &Bot, chat_id: ChatId, quiz: &QuizEngine) -> HandlerResult {
    match quiz.phase() {
        QuizPhase::NameInput | QuizPhase::Finished(_) => {
            bot.send_message(chat_id, NAME_PROMPT)
                .reply_markup(KeyboardRemove::new())
                .await?;
        }
        QuizPhase::Playing(session) if session.is_answered() => {
            send_next_button(bot, chat_id, quiz).await?;
        }
        QuizPhase::Playing(_) => send_question(bot, chat_id, quiz).await?,
    }
    Ok(())
}

async fn send_question(bot: &Bot, chat_id: ChatId, quiz: &QuizEngine) -> HandlerResult {
    let (Some(session), Some(question)) = (quiz.session(), quiz.current_question()) else {
        return Ok(());
    };

    let text = format!(
        "Score: {} | Question {} / {}\n[{}]\n\n{}",
        session.score(),
        session.current_index() + 1,
        quiz.total_questions(),
        question.difficulty.label(),
        question.question
    );
    let keyboard = KeyboardMarkup::new(
        question
            .options
            .iter()
            .map(|option| vec![KeyboardButton::new(*option)])
            .collect::<Vec<_>>(),
    );
    bot.send_message(chat_id, text)
        .reply_markup(keyboard)
        .await?;
    Ok(())
}

async fn send_next_button(bot: &Bot, chat_id: ChatId, quiz: &QuizEngine) -> HandlerResult {
    let label = if quiz.is_last_question() {
        FINISH_QUIZ
    } else {
        NEXT_QUESTION
    };
    let Some(session) = quiz.session() else {
        return Ok(());
    };
    let text = match session.selected_answer() {
        Some(answer) => format!("Your answer: {}\nScore: {}", answer, session.score()),
        None => format!("Score: {}", session.score()),
    };
    bot.send_message(chat_id, text)
        .reply_markup(KeyboardMarkup::new(vec![vec![KeyboardButton::new(label)]]))
        .await?;
    Ok(())
}

pub async fn receive(
    bot: Bot,
    dialogue: ChatDialogue,
    mut state: ChatState,
    ctx: Arc<AppContext>,
    msg: Message,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let Some(text) = msg.text() else {
        bot.send_message(chat_id, "Please answer with text.").await?;
        return Ok(());
    };

    let Some(answered) = state.quiz.session().map(|s| s.is_answered()) else {
        if let Err(err) = state.quiz.start_session(text) {
            bot.send_message(chat_id, err.to_string()).await?;
            return Ok(());
        }
        dialogue.update(state.clone()).await?;
        return send_question(&bot, chat_id, &state.quiz).await;
    };

    if !answered {
        let is_option = state
            .quiz
            .current_question()
            .map(|q| q.options.iter().any(|option| *option == text))
            .unwrap_or(false);
        if !is_option {
            bot.send_message(chat_id, "Please choose one of the options.")
                .await?;
            return Ok(());
        }

        if let Some(feedback) = state.quiz.select_answer(text) {
            let reply = if feedback.correct {
                "Correct!".to_string()
            } else {
                format!("Wrong! The correct answer is:\n{}", feedback.correct_answer)
            };
            bot.send_message(chat_id, reply).await?;
        }
        dialogue.update(state.clone()).await?;
        return send_next_button(&bot, chat_id, &state.quiz).await;
    }

    if text != NEXT_QUESTION && text != FINISH_QUIZ {
        return send_next_button(&bot, chat_id, &state.quiz).await;
    }

    match state.quiz.advance() {
        Some(outcome) => {
            state
                .views
                .complete_quiz(outcome.score, outcome.participant_name.clone());
            dialogue.update(state.clone()).await?;
            certificate::show(
                &bot,
                &ctx,
                chat_id,
                &outcome.participant_name,
                outcome.score,
                state.quiz.total_questions(),
            )
            .await
        }
        None => {
            dialogue.update(state.clone()).await?;
            send_question(&bot, chat_id, &state.quiz).await
        }
    }
}
