use super::{Difficulty, QuizQuestion};

// Prompt engineering question set, asked in this order.
pub static QUIZ_QUESTIONS: &[QuizQuestion] = &[
    QuizQuestion {
        question: "What is a \"prompt\" in the context of generative AI?",
        options: &[
            "The input text or instructions given to the model",
            "The model's training dataset",
            "The hardware the model runs on",
            "The output produced by the model",
        ],
        correct_answer: "The input text or instructions given to the model",
        difficulty: Difficulty::Easy,
    },
    QuizQuestion {
        question: "Which prompt is most likely to get a useful answer?",
        options: &[
            "Write something.",
            "Tell me stuff about dogs.",
            "Summarize the main causes of dog anxiety in 3 bullet points for new owners.",
            "Dogs?",
        ],
        correct_answer:
            "Summarize the main causes of dog anxiety in 3 bullet points for new owners.",
        difficulty: Difficulty::Easy,
    },
    QuizQuestion {
        question: "What is \"few-shot\" prompting?",
        options: &[
            "Limiting the model to a few output tokens",
            "Including a few worked examples of the task in the prompt",
            "Asking the same question a few times",
            "Training the model on a small dataset",
        ],
        correct_answer: "Including a few worked examples of the task in the prompt",
        difficulty: Difficulty::Easy,
    },
    QuizQuestion {
        question: "What does assigning a role (e.g. \"You are an expert editor\") mainly do?",
        options: &[
            "Gives the model internet access",
            "Sets the tone, perspective and expertise of the response",
            "Makes the model run faster",
            "Guarantees factual accuracy",
        ],
        correct_answer: "Sets the tone, perspective and expertise of the response",
        difficulty: Difficulty::Medium,
    },
    QuizQuestion {
        question: "What is the purpose of \"chain-of-thought\" prompting?",
        options: &[
            "To link several chatbots together",
            "To encourage the model to reason step by step before answering",
            "To shorten the model's answers",
            "To encrypt the conversation",
        ],
        correct_answer: "To encourage the model to reason step by step before answering",
        difficulty: Difficulty::Medium,
    },
    QuizQuestion {
        question: "Which setting usually makes a model's output more random and creative?",
        options: &[
            "A lower temperature",
            "A higher temperature",
            "A shorter prompt",
            "A smaller context window",
        ],
        correct_answer: "A higher temperature",
        difficulty: Difficulty::Medium,
    },
    QuizQuestion {
        question: "What is a \"hallucination\" in large language models?",
        options: &[
            "A confident answer that is not grounded in fact",
            "A visual glitch in generated images",
            "A model refusing to answer",
            "A very long response",
        ],
        correct_answer: "A confident answer that is not grounded in fact",
        difficulty: Difficulty::Medium,
    },
    QuizQuestion {
        question: "Why use delimiters such as triple quotes or XML tags in a prompt?",
        options: &[
            "They make the prompt cheaper",
            "They clearly separate instructions from the data to be processed",
            "They are required by every model",
            "They disable safety filters",
        ],
        correct_answer: "They clearly separate instructions from the data to be processed",
        difficulty: Difficulty::Hard,
    },
    QuizQuestion {
        question: "What is \"prompt injection\"?",
        options: &[
            "Adding more examples to a prompt",
            "Untrusted input that overrides or subverts the original instructions",
            "Compressing a prompt to save tokens",
            "Fine-tuning a model with prompts",
        ],
        correct_answer: "Untrusted input that overrides or subverts the original instructions",
        difficulty: Difficulty::Hard,
    },
    QuizQuestion {
        question: "When editing an image with a text prompt, which instruction works best?",
        options: &[
            "Make it better",
            "Change stuff",
            "Replace the grey sky with a purple sunset and keep the people unchanged",
            "Edit",
        ],
        correct_answer:
            "Replace the grey sky with a purple sunset and keep the people unchanged",
        difficulty: Difficulty::Hard,
    },
];
