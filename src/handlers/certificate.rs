use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{InputFile, KeyboardButton, KeyboardMarkup},
};

use super::{go_to, AppContext, ChatDialogue, ChatState, HandlerResult};
use crate::{certificate::Certificate, view::AppView};

const TRY_AGAIN: &str = "Try Again";
const PRINT_CERTIFICATE: &str = "Print Certificate";

fn keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(TRY_AGAIN),
        KeyboardButton::new(PRINT_CERTIFICATE),
    ]])
}

pub async fn show(
    bot: &Bot,
    ctx: &AppContext,
    chat_id: ChatId,
    participant_name: &str,
    score: usize,
    total_questions: usize,
) -> HandlerResult {
    let certificate =
        Certificate::new(participant_name, score, total_questions, &ctx.program_director);
    bot.send_message(chat_id, certificate.to_string())
        .reply_markup(keyboard())
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
    let Some((score, name)) = state
        .views
        .quiz_result()
        .map(|(score, name)| (score, name.to_string()))
    else {
        return go_to(&bot, &dialogue, &ctx, state, AppView::Home).await;
    };

    match msg.text() {
        Some(TRY_AGAIN) => {
            state.views.restart();
            state.quiz.reset();
            dialogue.update(state.clone()).await?;
            super::quiz::show(&bot, chat_id, &state.quiz).await
        }
        Some(PRINT_CERTIFICATE) => {
            let certificate = Certificate::new(
                &name,
                score,
                state.quiz.total_questions(),
                &ctx.program_director,
            );
            bot.send_document(
                chat_id,
                InputFile::memory(certificate.to_string().into_bytes())
                    .file_name("certificate.txt"),
            )
            .caption("Your certificate, ready to print.")
            .await?;
            Ok(())
        }
        _ => show(&bot, &ctx, chat_id, &name, score, state.quiz.total_questions()).await,
    }
}
