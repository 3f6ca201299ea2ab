use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Operator-facing strings of the widget.
pub trait Language: Send + Sync {
    fn microfront_label(&self) -> &'static str;
    fn header_title(&self) -> &'static str;
    fn session_label(&self) -> &'static str;
    fn tunnel_label(&self) -> &'static str;
    fn remote_label(&self) -> &'static str;
    fn module_label(&self) -> &'static str;
    fn notify_cta(&self) -> &'static str;
    fn notify_body(&self) -> &'static str;
    fn anonymous_user(&self) -> &'static str;

    fn chat_section(&self) -> &'static str;
    fn chat_title(&self) -> &'static str;
    fn session_prefix(&self) -> &'static str;
    fn voice(&self) -> &'static str;
    fn new_tunnel(&self) -> &'static str;
    fn delay_notify(&self) -> &'static str;
    fn delay_sending(&self) -> &'static str;
    fn placeholder(&self) -> &'static str;
    fn send(&self) -> &'static str;
    fn sending(&self) -> &'static str;
    fn empty(&self) -> &'static str;
    fn agent_label(&self) -> &'static str;
    fn status_pending(&self) -> &'static str;
    fn status_error(&self) -> &'static str;
    fn status_ok(&self) -> &'static str;
    fn translation_label(&self) -> &'static str;

    fn translating(&self) -> &'static str;
    fn translation_failed(&self) -> &'static str;
    fn fallback_warning(&self) -> &'static str;
    fn voice_transcript(&self) -> &'static str;
    fn delayed_notify_body(&self) -> &'static str;
    fn delayed_notify_title(&self) -> &'static str;

    fn gate_title(&self) -> &'static str;
    fn gate_rejected(&self) -> &'static str;
    fn gate_token_prompt(&self) -> &'static str;
    fn quit_hint(&self) -> &'static str;

    fn status_ready(&self) -> &'static str;
    fn status_translated(&self) -> &'static str;
    fn status_fallback(&self) -> &'static str;
    fn status_failed(&self) -> &'static str;
    fn status_new_tunnel(&self) -> &'static str;
    fn status_host_notified(&self) -> &'static str;
    fn status_delay_scheduled(&self) -> &'static str;
    fn backend_label(&self) -> &'static str;

    /// Text of a resolved agent reply, e.g. `Traducción (EN): hello`.
    fn translation_line(&self, lang: &str, translated: &str) -> String;
}

/// Language selector used in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LanguageKind {
    #[default]
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "en")]
    English,
}

impl LanguageKind {
    pub fn strings(self) -> Arc<dyn Language> {
        match self {
            LanguageKind::Spanish => Arc::new(Spanish),
            LanguageKind::English => Arc::new(English),
        }
    }
}

pub struct Spanish;
impl Language for Spanish {
    fn microfront_label(&self) -> &'static str { "Microfront" }
    fn header_title(&self) -> &'static str { "Agente de traducción" }
    fn session_label(&self) -> &'static str { "Sesión" }
    fn tunnel_label(&self) -> &'static str { "Túnel" }
    fn remote_label(&self) -> &'static str { "Remoto" }
    fn module_label(&self) -> &'static str { "Módulo" }
    fn notify_cta(&self) -> &'static str { "Alertar al host" }
    fn notify_body(&self) -> &'static str { "Alerta enviada desde MF Agente" }
    fn anonymous_user(&self) -> &'static str { "Invitado" }

    fn chat_section(&self) -> &'static str { "Conversación" }
    fn chat_title(&self) -> &'static str { "Chat con traducción" }
    fn session_prefix(&self) -> &'static str { "Sesión activa" }
    fn voice(&self) -> &'static str { "Voz (mock)" }
    fn new_tunnel(&self) -> &'static str { "Nuevo túnel" }
    fn delay_notify(&self) -> &'static str { "Notificar en 10s" }
    fn delay_sending(&self) -> &'static str { "Enviando aviso..." }
    fn placeholder(&self) -> &'static str { "Escribe un mensaje..." }
    fn send(&self) -> &'static str { "Enviar" }
    fn sending(&self) -> &'static str { "Enviando..." }
    fn empty(&self) -> &'static str { "Aún no hay mensajes. Escribe algo para empezar." }
    fn agent_label(&self) -> &'static str { "Agente" }
    fn status_pending(&self) -> &'static str { "Pendiente" }
    fn status_error(&self) -> &'static str { "Error" }
    fn status_ok(&self) -> &'static str { "Enviado" }
    fn translation_label(&self) -> &'static str { "Traducción" }

    fn translating(&self) -> &'static str { "Traduciendo..." }
    fn translation_failed(&self) -> &'static str { "Error al traducir" }
    fn fallback_warning(&self) -> &'static str {
        "El servicio de traducción no está disponible; se muestra el texto original."
    }
    fn voice_transcript(&self) -> &'static str { "Hola, necesito ayuda con mi pedido (voz simulada)" }
    fn delayed_notify_body(&self) -> &'static str { "Notificación diferida desde MF Agente" }
    fn delayed_notify_title(&self) -> &'static str { "Agente (delay)" }

    fn gate_title(&self) -> &'static str { "Configuración requerida" }
    fn gate_rejected(&self) -> &'static str {
        "Token inválido o ausente. El agente no puede mostrarse."
    }
    fn gate_token_prompt(&self) -> &'static str { "Token (Enter para aplicar)" }
    fn quit_hint(&self) -> &'static str { "Ctrl+Q salir" }

    fn status_ready(&self) -> &'static str { "Listo" }
    fn status_translated(&self) -> &'static str { "Traducción recibida" }
    fn status_fallback(&self) -> &'static str { "Traducción no disponible" }
    fn status_failed(&self) -> &'static str { "Falló la traducción" }
    fn status_new_tunnel(&self) -> &'static str { "Nuevo túnel" }
    fn status_host_notified(&self) -> &'static str { "Host notificado" }
    fn status_delay_scheduled(&self) -> &'static str { "Aviso diferido programado" }
    fn backend_label(&self) -> &'static str { "Servicio" }

    fn translation_line(&self, lang: &str, translated: &str) -> String {
        format!("Traducción ({}): {}", lang.to_uppercase(), translated)
    }
}

pub struct English;
impl Language for English {
    fn microfront_label(&self) -> &'static str { "Microfront" }
    fn header_title(&self) -> &'static str { "Translation agent" }
    fn session_label(&self) -> &'static str { "Session" }
    fn tunnel_label(&self) -> &'static str { "Tunnel" }
    fn remote_label(&self) -> &'static str { "Remote" }
    fn module_label(&self) -> &'static str { "Module" }
    fn notify_cta(&self) -> &'static str { "Alert host" }
    fn notify_body(&self) -> &'static str { "Alert sent from the Agent MF" }
    fn anonymous_user(&self) -> &'static str { "Guest" }

    fn chat_section(&self) -> &'static str { "Conversation" }
    fn chat_title(&self) -> &'static str { "Translated chat" }
    fn session_prefix(&self) -> &'static str { "Active session" }
    fn voice(&self) -> &'static str { "Voice (mock)" }
    fn new_tunnel(&self) -> &'static str { "New tunnel" }
    fn delay_notify(&self) -> &'static str { "Notify in 10s" }
    fn delay_sending(&self) -> &'static str { "Sending notice..." }
    fn placeholder(&self) -> &'static str { "Type a message..." }
    fn send(&self) -> &'static str { "Send" }
    fn sending(&self) -> &'static str { "Sending..." }
    fn empty(&self) -> &'static str { "No messages yet. Type something to start." }
    fn agent_label(&self) -> &'static str { "Agent" }
    fn status_pending(&self) -> &'static str { "Pending" }
    fn status_error(&self) -> &'static str { "Error" }
    fn status_ok(&self) -> &'static str { "Sent" }
    fn translation_label(&self) -> &'static str { "Translation" }

    fn translating(&self) -> &'static str { "Translating..." }
    fn translation_failed(&self) -> &'static str { "Translation failed" }
    fn fallback_warning(&self) -> &'static str {
        "The translation service is unavailable; showing the original text."
    }
    fn voice_transcript(&self) -> &'static str { "Hello, I need help with my order (simulated voice)" }
    fn delayed_notify_body(&self) -> &'static str { "Deferred notification from the Agent MF" }
    fn delayed_notify_title(&self) -> &'static str { "Agent (delay)" }

    fn gate_title(&self) -> &'static str { "Configuration required" }
    fn gate_rejected(&self) -> &'static str {
        "Invalid or missing token. The agent cannot be shown."
    }
    fn gate_token_prompt(&self) -> &'static str { "Token (Enter to apply)" }
    fn quit_hint(&self) -> &'static str { "Ctrl+Q quit" }

    fn status_ready(&self) -> &'static str { "Ready" }
    fn status_translated(&self) -> &'static str { "Translation received" }
    fn status_fallback(&self) -> &'static str { "Translation unavailable" }
    fn status_failed(&self) -> &'static str { "Translation failed" }
    fn status_new_tunnel(&self) -> &'static str { "New tunnel" }
    fn status_host_notified(&self) -> &'static str { "Host notified" }
    fn status_delay_scheduled(&self) -> &'static str { "Deferred notice scheduled" }
    fn backend_label(&self) -> &'static str { "Backend" }

    fn translation_line(&self, lang: &str, translated: &str) -> String {
        format!("Translation ({}): {}", lang.to_uppercase(), translated)
    }
}
