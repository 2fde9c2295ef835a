use std::sync::Arc;

use teloxide::{
    net::Download,
    prelude::*,
    types::{ChatAction, InputFile, KeyboardRemove},
};

use super::{AppContext, ChatDialogue, HandlerError, HandlerResult};
use crate::image::{editor::PendingEdit, ImageEditor};

pub const IMAGE_READ_FAILED: &str = "Could not read that image, please try again.";
const STILL_WORKING: &str = "Still working on the previous edit, please wait.";

const EDITOR_INTRO: &str = "AI Image Editor\n\n\
Use text prompts to edit your images with Gemini. \
Send a photo to get started, then describe the edit, \
e.g. 'Add a retro filter' or 'Make the sky purple'. \
You can also put the instruction in the photo caption.";

pub async fn show(bot: &Bot, chat_id: ChatId) -> HandlerResult {
    bot.send_message(chat_id, EDITOR_INTRO)
        .reply_markup(KeyboardRemove::new())
        .await?;
    Ok(())
}

/// Picks the image carried by a message: the largest photo size, or an
/// image document.
fn image_file(msg: &Message) -> Option<(String, String)> {
    if let Some(largest) = msg.photo().and_then(|sizes| sizes.last()) {
        return Some((largest.file.id.clone(), "image/jpeg".to_string()));
    }
    let document = msg.document()?;
    let mime = document.mime_type.as_ref()?;
    if mime.type_() != "image" {
        return None;
    }
    Some((document.file.id.clone(), mime.essence_str().to_string()))
}

async fn download_image(bot: &Bot, file_id: String) -> Result<Vec<u8>, HandlerError> {
    let file = bot.get_file(file_id).await?;
    let mut bytes = Vec::new();
    bot.download_file(&file.path, &mut bytes).await?;
    Ok(bytes)
}

/// Fetches an uploaded image into the chat's editor. Fetch failures are
/// reported in the chat and leave the editor as it was. Returns whether the
/// image was loaded.
async fn receive_image(
    bot: &Bot,
    ctx: &AppContext,
    chat_id: ChatId,
    file_id: String,
    mime_type: String,
) -> Result<bool, HandlerError> {
    let bytes = match download_image(bot, file_id).await {
        Ok(bytes) => bytes,
        Err(err) => {
            log::warn!("Could not fetch image from chat {}: {}", chat_id, err);
            bot.send_message(chat_id, IMAGE_READ_FAILED).await?;
            return Ok(false);
        }
    };
    log::debug!("Received {} byte image from chat {}", bytes.len(), chat_id);

    let loaded = ctx
        .editors
        .lock()
        .await
        .entry(chat_id)
        .or_default()
        .load_image(bytes, mime_type);
    if !loaded {
        bot.send_message(chat_id, STILL_WORKING).await?;
    }
    Ok(loaded)
}

pub async fn receive(
    bot: Bot,
    dialogue: ChatDialogue,
    ctx: Arc<AppContext>,
    msg: Message,
) -> HandlerResult {
    let chat_id = dialogue.chat_id();

    let instruction = if let Some((file_id, mime_type)) = image_file(&msg) {
        if !receive_image(&bot, &ctx, chat_id, file_id, mime_type).await? {
            return Ok(());
        }

        match msg.caption() {
            Some(caption) if !caption.trim().is_empty() => caption.to_string(),
            _ => {
                bot.send_message(chat_id, "Got it! Now tell me how to edit the image.")
                    .await?;
                return Ok(());
            }
        }
    } else if let Some(text) = msg.text() {
        text.to_string()
    } else {
        bot.send_message(chat_id, "Please send a photo or an editing instruction.")
            .await?;
        return Ok(());
    };

    let pending = {
        let mut editors = ctx.editors.lock().await;
        let editor = editors.entry(chat_id).or_default();
        editor.set_instruction(instruction);
        editor.begin_edit()
    };

    match pending {
        Ok(pending) => {
            bot.send_message(chat_id, "Generating...").await?;
            let _ = bot.send_chat_action(chat_id, ChatAction::UploadPhoto).await;
            tokio::spawn(run_edit(bot, ctx, chat_id, pending));
        }
        Err(err) => {
            bot.send_message(chat_id, err.to_string()).await?;
        }
    }
    Ok(())
}

/// Calls the gateway off the handler so the chat stays responsive, then
/// applies the result if the chat is still waiting for it.
async fn run_edit(bot: Bot, ctx: Arc<AppContext>, chat_id: ChatId, pending: PendingEdit) {
    let result = ctx.gateway.edit_image(&pending.request).await;

    let reply = {
        let mut editors = ctx.editors.lock().await;
        let applied = match editors.get_mut(&chat_id) {
            Some(editor) => editor.finish_edit(pending.ticket, result).then(|| reply_for(editor)),
            None => None,
        };
        match applied {
            Some(reply) => reply,
            None => {
                log::debug!("Dropping stale edit result for chat {}", chat_id);
                return;
            }
        }
    };

    let sent = match reply {
        Reply::Image { bytes, file_name } => bot
            .send_photo(chat_id, InputFile::memory(bytes).file_name(file_name))
            .caption("Edited")
            .await
            .map(|_| ()),
        Reply::Error(message) => bot.send_message(chat_id, message).await.map(|_| ()),
    };
    if let Err(err) = sent {
        log::error!("Failed to deliver edit result to chat {}: {}", chat_id, err);
    }
}

enum Reply {
    Image { bytes: Vec<u8>, file_name: String },
    Error(String),
}

fn reply_for(editor: &ImageEditor) -> Reply {
    match (editor.edited(), editor.error()) {
        (Some(edited), _) => Reply::Image {
            bytes: edited.image.clone(),
            file_name: edited.file_name(),
        },
        (None, Some(error)) => Reply::Error(error.to_string()),
        (None, None) => Reply::Error(crate::image::editor::EDIT_FAILED_MESSAGE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::image::ImageEditGateway;
    use httpmock::prelude::*;
    use std::time::Duration;

    const TOKEN: &str = "123:test";

    fn context() -> AppContext {
        let gateway = ImageEditGateway::new(&Config {
            api_key: None,
            model: "test-model".into(),
            api_base: "http://127.0.0.1:9".into(),
            timeout: Duration::from_secs(5),
            program_director: "Jane Doe".into(),
        })
        .unwrap();
        AppContext::new(gateway, "Jane Doe".into())
    }

    #[tokio::test]
    async fn failed_download_is_reported_and_keeps_the_original() {
        let server = MockServer::start_async().await;
        let get_file = server
            .mock_async(|when, then| {
                when.method(POST).path(format!("/bot{}/GetFile", TOKEN));
                then.status(400)
                    .header("content-type", "application/json")
                    .json_body(serde_json::json!({
                        "ok": false,
                        "error_code": 400,
                        "description": "Bad Request: file is too big"
                    }));
            })
            .await;
        let send_message = server
            .mock_async(|when, then| {
                when.method(POST).path(format!("/bot{}/SendMessage", TOKEN));
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(serde_json::json!({
                        "ok": true,
                        "result": {
                            "message_id": 1,
                            "date": 0,
                            "chat": { "id": 42, "type": "private", "first_name": "Ada" },
                            "from": { "id": 1, "is_bot": true, "first_name": "bot" },
                            "text": IMAGE_READ_FAILED
                        }
                    }));
            })
            .await;

        let bot = Bot::new(TOKEN).set_api_url(reqwest::Url::parse(&server.base_url()).unwrap());
        let ctx = context();
        let chat_id = ChatId(42);
        ctx.editors
            .lock()
            .await
            .entry(chat_id)
            .or_default()
            .load_image(vec![1, 2, 3], "image/jpeg");

        let loaded = receive_image(
            &bot,
            &ctx,
            chat_id,
            "huge-file".to_string(),
            "image/png".to_string(),
        )
        .await
        .unwrap();

        assert!(!loaded);
        get_file.assert_calls_async(1).await;
        send_message.assert_calls_async(1).await;

        let editors = ctx.editors.lock().await;
        let original = editors[&chat_id].original().unwrap();
        assert_eq!(original.bytes, vec![1, 2, 3]);
        assert_eq!(original.mime_type, "image/jpeg");
    }
}
