use std::sync::Arc;

use dotenv::dotenv;
use teloxide::{dispatching::dialogue::InMemStorage, prelude::*, utils::command::BotCommands};

use team21_ai_suite_bot::{
    config::{self, Config},
    handlers::{self, AppContext, ChatState, Command},
    image::ImageEditGateway,
};

#[tokio::main]
async fn main() {
    // A .env file is optional; the variables may come from the environment.
    dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting Team 21 AI Suite bot...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Invalid configuration: {}", err);
            std::process::exit(1);
        }
    };

    let gateway = match ImageEditGateway::new(&config) {
        Ok(gateway) => gateway,
        Err(err) => {
            log::error!("Unable to build the image service client: {}", err);
            std::process::exit(1);
        }
    };
    if !gateway.is_configured() {
        log::error!(
            "{} is not set; image editing will report a configuration error",
            config::API_KEY_VAR
        );
    }
    log::info!("Image edits go to {} ({})", config.api_base, config.model);

    let ctx = Arc::new(AppContext::new(gateway, config.program_director.clone()));

    let bot = Bot::from_env();
    if let Err(err) = bot.set_my_commands(Command::bot_commands()).await {
        log::warn!("Could not register bot commands: {}", err);
    }

    Dispatcher::builder(bot, handlers::schema())
        .dependencies(dptree::deps![InMemStorage::<ChatState>::new(), ctx])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
