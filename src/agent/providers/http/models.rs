//! Wire format of the translation endpoint.

#[derive(serde::Serialize)]
pub struct TranslatePayload<'a> {
    pub text: &'a str,
}
