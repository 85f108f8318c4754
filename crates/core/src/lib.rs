pub mod config;
pub mod convert;
pub mod error;
pub mod fetch;
pub mod mail;
pub mod parse;
pub mod pipeline;
pub mod sanitize;
pub mod workdir;

pub use config::{Config, SmtpConfig};
pub use convert::{Converter, PandocConverter, epub_path};
pub use error::{ErrorKind, KindlerError, Result};
pub use fetch::{FetchConfig, SavedPage, download_article, fetch_url, page_stem, validate_url};
pub use mail::{Mailer, SmtpMailer, compose_message};
pub use parse::Document;
pub use pipeline::{Delivery, Kindler};
pub use sanitize::{MAX_STEM_BYTES, sanitize_title};
pub use workdir::WorkDir;
