//! The fetch, convert and mail pipeline.
//!
//! [`Kindler`] owns the working directory and the three external
//! capabilities, and runs them strictly in order. The first failing step
//! aborts the run; whatever was already written stays on disk until
//! [`Kindler::cleanup`] is called.

use tracing::info;
use url::Url;

use crate::convert::{Converter, PandocConverter};
use crate::fetch::{FetchConfig, download_article};
use crate::mail::{Mailer, SmtpMailer};
use crate::workdir::WorkDir;
use crate::{Config, Result};

/// Outcome of a successful delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Name of the article as delivered: the stem of the e-book file.
    pub name: String,
    /// Stored HTML file, relative to the working directory.
    pub html_file: String,
    /// Converted e-book file, relative to the working directory.
    pub epub_file: String,
}

impl Delivery {
    /// Human readable confirmation.
    pub fn message(&self) -> String {
        format!("Article '{}' sent to Kindle.", self.name)
    }
}

/// Sends web articles to a reading device.
pub struct Kindler<C, M> {
    workdir: WorkDir,
    fetch: FetchConfig,
    converter: C,
    mailer: M,
}

impl Kindler<PandocConverter, SmtpMailer> {
    /// Builds the production pipeline: pandoc for conversion, SMTP for delivery.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            WorkDir::open(&config.workdir)?,
            config.fetch.clone(),
            PandocConverter::new(config.pandoc.clone()),
            SmtpMailer::new(&config.smtp)?,
        ))
    }
}

impl<C: Converter, M: Mailer> Kindler<C, M> {
    pub fn new(workdir: WorkDir, fetch: FetchConfig, converter: C, mailer: M) -> Self {
        Self { workdir, fetch, converter, mailer }
    }

    pub fn workdir(&self) -> &WorkDir {
        &self.workdir
    }

    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    /// Downloads `url`, converts it to EPUB and mails the result.
    pub async fn send_article(&self, url: &Url) -> Result<Delivery> {
        let page = download_article(url, &self.workdir, &self.fetch).await?;

        let epub_path = self.converter.convert(&self.workdir.path(&page.file_name)).await?;
        let epub_file = epub_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.mailer.send(&epub_path).await?;

        let name = epub_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| page.title.clone());
        info!(url = %url, file = %epub_file, "Article delivered");

        Ok(Delivery { name, html_file: page.file_name, epub_file })
    }

    /// Removes every file from the working directory.
    pub fn cleanup(&self) -> Result<usize> {
        self.workdir.cleanup()
    }
}
