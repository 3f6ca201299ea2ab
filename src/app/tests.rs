use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use super::{App, CommandAction};
use crate::agent::host::testing::RecordingNotifier;
use crate::agent::host::{ACCESS_TOKEN, GateRejection, HostUser};
use crate::agent::providers::testing::ScriptedTranslator;
use crate::agent::{AgentEvent, AgentSettings, HostConfig, MessageStatus, NotifyOptions};
use crate::ui::render;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn valid_config() -> HostConfig {
    HostConfig {
        token: Some(ACCESS_TOKEN.to_string()),
        user: Some(HostUser {
            name: "Ana".to_string(),
        }),
        ..HostConfig::default()
    }
}

fn app_with(
    settings: AgentSettings,
    config: Option<HostConfig>,
) -> (App, Arc<ScriptedTranslator>) {
    init_logging();
    let translator = Arc::new(ScriptedTranslator::default());
    let app = App::with_translator(settings, config, translator.clone());
    (app, translator)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.handle_key(key(KeyCode::Char(ch)));
    }
}

async fn settle(app: &mut App) {
    let event = app
        .chat
        .as_mut()
        .expect("chat mounted")
        .next_event()
        .await
        .expect("event");
    app.handle_agent_event(event);
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer.get(x, y).symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn rejected_configs_never_mount_chat_or_translate() {
    let cases = [
        (None, GateRejection::MissingConfig),
        (Some(HostConfig::default()), GateRejection::MissingToken),
        (
            Some(valid_config().with_token("nicorivera")),
            GateRejection::InvalidToken,
        ),
    ];
    for (config, reason) in cases {
        let (mut app, translator) = app_with(AgentSettings::default(), config);
        assert!(!app.is_chat_mounted());
        assert_eq!(app.gate, Err(reason));

        app.execute_action(CommandAction::Send);
        app.execute_action(CommandAction::VoiceMock);
        app.handle_key(key(KeyCode::F(2)));
        assert!(!app.is_chat_mounted());
        assert_eq!(translator.calls(), 0);
    }
}

#[test]
fn token_entered_on_rejection_screen_mounts_chat() {
    let (mut app, _) = app_with(AgentSettings::default(), None);

    type_text(&mut app, "wrong");
    app.handle_key(key(KeyCode::Enter));
    assert!(!app.is_chat_mounted());
    assert_eq!(app.gate, Err(GateRejection::InvalidToken));
    assert!(app.token_input.is_empty());

    type_text(&mut app, ACCESS_TOKEN);
    app.handle_key(key(KeyCode::Enter));
    assert!(app.is_chat_mounted());
    assert_eq!(app.gate, Ok(()));
    assert_eq!(
        app.host_config.as_ref().and_then(|c| c.token.as_deref()),
        Some(ACCESS_TOKEN)
    );
}

#[test]
fn user_name_falls_back_to_placeholder() {
    let (app, _) = app_with(
        AgentSettings::default(),
        Some(HostConfig::default().with_token(ACCESS_TOKEN)),
    );
    assert_eq!(app.user_name(), app.lang.anonymous_user());

    let (app, _) = app_with(AgentSettings::default(), Some(valid_config()));
    assert_eq!(app.user_name(), "Ana");
}

#[tokio::test]
async fn enter_sends_trimmed_input_and_clears_it() {
    let (mut app, translator) = app_with(AgentSettings::default(), Some(valid_config()));

    type_text(&mut app, "  hola  ");
    app.handle_key(key(KeyCode::Enter));
    assert!(app.chat_input.is_empty());
    assert_eq!(app.chat.as_ref().map(|c| c.conversation().len()), Some(2));

    settle(&mut app).await;
    let chat = app.chat.as_ref().expect("chat mounted");
    assert!(!chat.is_busy());
    assert_eq!(
        chat.conversation().last().and_then(|m| m.status),
        Some(MessageStatus::Sent)
    );
    assert_eq!(
        translator.requests(),
        vec![("hola".to_string(), chat.tunnel_id().to_string())]
    );
}

#[tokio::test]
async fn enter_while_busy_keeps_the_input() {
    let (mut app, translator) = app_with(AgentSettings::default(), Some(valid_config()));

    type_text(&mut app, "uno");
    app.handle_key(key(KeyCode::Enter));
    type_text(&mut app, "dos");
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.chat_input.buffer(), "dos");
    assert_eq!(app.chat.as_ref().map(|c| c.conversation().len()), Some(2));
    assert!(!app.action_enabled(CommandAction::VoiceMock));

    settle(&mut app).await;
    assert_eq!(translator.calls(), 1);
    assert!(app.action_enabled(CommandAction::VoiceMock));
}

#[tokio::test]
async fn blank_input_is_ignored() {
    let (mut app, translator) = app_with(AgentSettings::default(), Some(valid_config()));
    type_text(&mut app, "   ");
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.chat_input.buffer(), "   ");
    assert_eq!(app.chat.as_ref().map(|c| c.conversation().len()), Some(0));
    assert_eq!(translator.calls(), 0);
}

#[tokio::test]
async fn history_recalls_sent_messages() {
    let (mut app, _) = app_with(AgentSettings::default(), Some(valid_config()));
    type_text(&mut app, "hola");
    app.handle_key(key(KeyCode::Enter));
    settle(&mut app).await;

    app.handle_key(key(KeyCode::Up));
    assert_eq!(app.chat_input.buffer(), "hola");
    app.handle_key(key(KeyCode::Down));
    assert!(app.chat_input.is_empty());
}

#[test]
fn new_tunnel_key_rotates_the_tunnel() {
    let (mut app, _) = app_with(AgentSettings::default(), Some(valid_config()));
    let before = app.chat.as_ref().map(|c| c.tunnel_id().to_string());
    app.handle_key(key(KeyCode::F(3)));
    let after = app.chat.as_ref().map(|c| c.tunnel_id().to_string());
    assert_ne!(before, after);
}

#[test]
fn alert_host_notifies_right_away() {
    let (mut app, _) = app_with(AgentSettings::default(), Some(valid_config()));
    let notifier = Arc::new(RecordingNotifier::default());
    app.notifier = Some(notifier.clone());

    app.handle_key(key(KeyCode::F(5)));

    assert_eq!(
        notifier.calls(),
        vec![(app.lang.notify_body().to_string(), None)]
    );
}

#[test]
fn host_actions_are_disabled_without_notifier() {
    let (mut app, _) = app_with(AgentSettings::default(), Some(valid_config()));
    assert!(app.notifier.is_none());
    assert!(!app.action_enabled(CommandAction::AlertHost));
    assert!(!app.action_enabled(CommandAction::DelayedNotify));
    app.handle_key(key(KeyCode::F(4)));
    assert!(!app.delay_pending);
}

#[tokio::test]
async fn delayed_notify_fires_once_with_options() {
    let settings = AgentSettings {
        notify_delay_secs: 0,
        ..AgentSettings::default()
    };
    let (mut app, _) = app_with(settings, Some(valid_config()));
    let notifier = Arc::new(RecordingNotifier::default());
    app.notifier = Some(notifier.clone());

    app.handle_key(key(KeyCode::F(4)));
    assert!(app.delay_pending);
    assert!(!app.action_enabled(CommandAction::DelayedNotify));
    app.handle_key(key(KeyCode::F(4)));

    let event = app
        .chat
        .as_mut()
        .expect("chat mounted")
        .next_event()
        .await
        .expect("event");
    assert!(matches!(event, AgentEvent::DelayedNotifyFired));
    app.handle_agent_event(event);

    assert!(!app.delay_pending);
    assert_eq!(
        notifier.calls(),
        vec![(
            app.lang.delayed_notify_body().to_string(),
            Some(NotifyOptions {
                title: Some("Agente (delay)".to_string()),
                target: Some("agente".to_string()),
            })
        )]
    );
}

#[test]
fn ctrl_q_quits_from_any_screen() {
    let (mut app, _) = app_with(AgentSettings::default(), None);
    app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
    assert!(app.should_quit);
    assert!(app.token_input.is_empty());
}

#[test]
fn rejection_screen_renders_without_chat() {
    let (mut app, _) = app_with(AgentSettings::default(), None);
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("terminal");
    terminal.draw(|f| render(f, &mut app)).expect("draw");

    let text = screen_text(&terminal);
    assert!(text.contains(app.lang.gate_title()));
    assert!(text.contains("Token inválido"));
    assert!(app.action_areas.is_empty());
    assert!(app.message_area.is_none());
}

#[tokio::test]
async fn chat_screen_buttons_are_clickable() {
    let (mut app, translator) = app_with(AgentSettings::default(), Some(valid_config()));
    app.notifier = Some(Arc::new(RecordingNotifier::default()));
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).expect("terminal");
    terminal.draw(|f| render(f, &mut app)).expect("draw");

    let text = screen_text(&terminal);
    assert!(text.contains(app.lang.empty()));
    assert!(text.contains("Ana"));

    let actions: Vec<CommandAction> = app.action_areas.iter().map(|(_, a)| *a).collect();
    for expected in [
        CommandAction::AlertHost,
        CommandAction::VoiceMock,
        CommandAction::NewTunnel,
        CommandAction::DelayedNotify,
    ] {
        assert!(actions.contains(&expected), "missing {:?}", expected);
    }

    let (voice_area, _) = app
        .action_areas
        .iter()
        .find(|(_, action)| *action == CommandAction::VoiceMock)
        .copied()
        .expect("voice button");
    app.handle_mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: voice_area.x,
        row: voice_area.y,
        modifiers: KeyModifiers::NONE,
    });
    assert!(app.chat.as_ref().is_some_and(|c| c.is_busy()));

    settle(&mut app).await;
    assert_eq!(translator.requests()[0].0, app.lang.voice_transcript());
}

#[tokio::test]
async fn failed_translation_shows_banner() {
    use crate::agent::providers::TranslateError;

    init_logging();
    let translator = Arc::new(ScriptedTranslator::with([Err(TranslateError::Http {
        status: 500,
        status_text: "Internal Server Error".to_string(),
    })]));
    let mut app = App::with_translator(
        AgentSettings::default(),
        Some(valid_config()),
        translator.clone(),
    );
    type_text(&mut app, "hola");
    app.handle_key(key(KeyCode::Enter));
    settle(&mut app).await;

    let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
    terminal.draw(|f| render(f, &mut app)).expect("draw");
    let text = screen_text(&terminal);
    assert!(text.contains("API 500: Internal Server Error"));
    assert!(text.contains(app.lang.translation_failed()));
}
