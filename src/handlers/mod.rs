pub mod certificate;
pub mod editor;
pub mod home;
pub mod quiz;

use std::{collections::HashMap, sync::Arc};

use teloxide::{
    dispatching::{dialogue::InMemStorage, UpdateHandler},
    prelude::*,
    utils::command::BotCommands,
};
use tokio::sync::Mutex;

use crate::{
    image::{ImageEditGateway, ImageEditor},
    quiz::QuizEngine,
    view::{AppView, ViewCoordinator},
};

pub type ChatDialogue = Dialogue<ChatState, InMemStorage<ChatState>>;
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;
pub type HandlerResult = Result<(), HandlerError>;

/// Editor state lives outside the dialogue so background edits can reach it.
pub type EditorSessions = Arc<Mutex<HashMap<ChatId, ImageEditor>>>;

/// Everything one chat remembers between messages.
#[derive(Clone, Default)]
pub struct ChatState {
    pub views: ViewCoordinator,
    pub quiz: QuizEngine,
}

pub struct AppContext {
    pub gateway: ImageEditGateway,
    pub editors: EditorSessions,
    pub program_director: String,
}

impl AppContext {
    pub fn new(gateway: ImageEditGateway, program_director: String) -> Self {
        Self {
            gateway,
            editors: Arc::new(Mutex::new(HashMap::new())),
            program_director,
        }
    }
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "show the welcome screen.")]
    Start,
    #[command(description = "go back to the welcome screen.")]
    Home,
    #[command(description = "open the AI image editor.")]
    Editor,
    #[command(description = "take the AI prompt engineering quiz.")]
    Quiz,
    #[command(description = "show this text.")]
    Help,
}

pub fn schema() -> UpdateHandler<HandlerError> {
    let commands = teloxide::filter_command::<Command, _>().endpoint(receive_command);

    Update::filter_message()
        .enter_dialogue::<Message, InMemStorage<ChatState>, ChatState>()
        .branch(commands)
        .branch(
            dptree::filter(|state: ChatState| matches!(state.views.current(), AppView::Home))
                .endpoint(home::receive),
        )
        .branch(
            dptree::filter(|state: ChatState| {
                matches!(state.views.current(), AppView::ImageEditor)
            })
            .endpoint(editor::receive),
        )
        .branch(
            dptree::filter(|state: ChatState| matches!(state.views.current(), AppView::Quiz))
                .endpoint(quiz::receive),
        )
        .branch(
            dptree::filter(|state: ChatState| {
                matches!(state.views.current(), AppView::Certificate { .. })
            })
            .endpoint(certificate::receive),
        )
}

async fn receive_command(
    bot: Bot,
    dialogue: ChatDialogue,
    state: ChatState,
    ctx: Arc<AppContext>,
    cmd: Command,
    msg: Message,
) -> HandlerResult {
    let target = match cmd {
        Command::Start | Command::Home => AppView::Home,
        Command::Editor => AppView::ImageEditor,
        Command::Quiz => AppView::Quiz,
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
            return Ok(());
        }
    };
    go_to(&bot, &dialogue, &ctx, state, target).await
}

/// Switches the chat to `target`, resets whatever the target owns, and shows it.
pub async fn go_to(
    bot: &Bot,
    dialogue: &ChatDialogue,
    ctx: &AppContext,
    mut state: ChatState,
    target: AppView,
) -> HandlerResult {
    let chat_id = dialogue.chat_id();

    // Leaving or re-entering the editor drops its state and any pending edit.
    let mut editors = ctx.editors.lock().await;
    if editors.remove(&chat_id).is_some_and(|e| e.is_loading()) {
        log::debug!("Discarding in-flight edit for chat {}", chat_id);
    }
    if target == AppView::ImageEditor {
        editors.insert(chat_id, ImageEditor::default());
    }
    drop(editors);

    if target == AppView::Quiz {
        state.quiz.reset();
    }
    state.views.navigate(target);
    dialogue.update(state.clone()).await?;

    render(bot, ctx, chat_id, &state).await
}

async fn render(bot: &Bot, ctx: &AppContext, chat_id: ChatId, state: &ChatState) -> HandlerResult {
    match state.views.current() {
        AppView::Home => home::show(bot, chat_id).await,
        AppView::ImageEditor => editor::show(bot, chat_id).await,
        AppView::Quiz => quiz::show(bot, chat_id, &state.quiz).await,
        AppView::Certificate {
            score,
            participant_name,
        } => {
            certificate::show(
                bot,
                ctx,
                chat_id,
                participant_name,
                *score,
                state.quiz.total_questions(),
            )
            .await
        }
    }
}
