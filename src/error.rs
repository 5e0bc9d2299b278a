use crate::{mailjet_client, web};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("web error: {0}")]
    Web(#[from] web::Error),
    #[error("mailjet client error: {0}")]
    MailjetClient(#[from] mailjet_client::Error),
    #[error("templating error: {0}")]
    Tera(#[from] tera::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
