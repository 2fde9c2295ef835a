use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup},
};

use super::{go_to, AppContext, ChatDialogue, ChatState, HandlerResult};
use crate::view::AppView;

pub const LAUNCH_EDITOR: &str = "Launch Image Editor";
pub const START_QUIZ: &str = "Start AI Quiz";

const WELCOME_TEXT: &str = "Welcome to the Team 21 AI Suite!\n\n\
Explore the future of artificial intelligence with our tools. \
Edit images with text prompts or test your knowledge with our AI quiz on prompt engineering.\n\n\
Use /home, /editor or /quiz at any time to switch.";

pub async fn show(bot: &Bot, chat_id: ChatId) -> HandlerResult {
    let keyboard = KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(LAUNCH_EDITOR),
        KeyboardButton::new(START_QUIZ),
    ]]);
    bot.send_message(chat_id, WELCOME_TEXT)
        .reply_markup(keyboard)
        .await?;
    Ok(())
}

pub async fn receive(
    bot: Bot,
    dialogue: ChatDialogue,
    state: ChatState,
    ctx: Arc<AppContext>,
    msg: Message,
) -> HandlerResult {
    let target = match msg.text() {
        Some(LAUNCH_EDITOR) => AppView::ImageEditor,
        Some(START_QUIZ) => AppView::Quiz,
        _ => return show(&bot, msg.chat.id).await,
    };
    go_to(&bot, &dialogue, &ctx, state, target).await
}
