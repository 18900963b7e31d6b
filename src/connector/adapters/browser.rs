//! Web prototyping connector driven by a scripted browser session.

use crate::config::{CredentialName, Credentials};
use crate::connector::{
    domain::{Locator, PrototypingScript, RepositoryUrl},
    ports::{
        BrowserDriver, BrowserSession, PrototypingConnector, PrototypingError, PrototypingResult,
    },
};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Prototyping connector that plays a [`PrototypingScript`] through a
/// [`BrowserDriver`].
///
/// Missing studio credentials fail before a browser session is opened. The
/// interaction sequence is bounded by the script timeout and the session is
/// closed however the sequence ends.
#[derive(Debug, Clone)]
pub struct BrowserPrototypingConnector<D>
where
    D: BrowserDriver,
{
    driver: D,
    script: PrototypingScript,
    credentials: Credentials,
}

impl<D> BrowserPrototypingConnector<D>
where
    D: BrowserDriver,
{
    /// Creates a connector over `driver`.
    #[must_use]
    pub const fn new(driver: D, script: PrototypingScript, credentials: Credentials) -> Self {
        Self {
            driver,
            script,
            credentials,
        }
    }

    async fn play(
        &self,
        session: &BrowserSession,
        prompt_text: &str,
        session_token: &str,
    ) -> PrototypingResult<RepositoryUrl> {
        let script = &self.script;

        self.driver.navigate(session, &script.start_url).await?;
        self.driver
            .add_cookie(session, &script.session_cookie, session_token)
            .await?;
        self.driver.navigate(session, &script.start_url).await?;

        self.driver.click(session, &script.create_project).await?;
        self.driver
            .fill(session, &script.prompt_input, prompt_text)
            .await?;
        self.driver.click(session, &script.submit_prompt).await?;
        debug!("prototyping brief submitted; waiting for the studio");

        self.wait_for(session, &script.ready_signal).await?;
        self.driver.click(session, &script.export_repository).await?;
        self.wait_for(session, &script.repository_link).await?;

        let link = self
            .driver
            .attribute(session, &script.repository_link, &script.link_attribute)
            .await?
            .ok_or(PrototypingError::MissingRepositoryLink)?;
        RepositoryUrl::new(link).map_err(PrototypingError::InvalidRepositoryUrl)
    }

    async fn wait_for(&self, session: &BrowserSession, locator: &Locator) -> PrototypingResult<()> {
        while !self.driver.is_present(session, locator).await? {
            tokio::time::sleep(self.script.poll_interval).await;
        }
        Ok(())
    }
}

#[async_trait]
impl<D> PrototypingConnector for BrowserPrototypingConnector<D>
where
    D: BrowserDriver,
{
    async fn run_prototyping(&self, prompt_text: &str) -> PrototypingResult<RepositoryUrl> {
        let token = self.credentials.require(CredentialName::PrototypingStudio)?;
        let session = self.driver.open_session().await?;

        let outcome = tokio::time::timeout(
            self.script.timeout,
            self.play(&session, prompt_text, token.expose()),
        )
        .await;

        if let Err(err) = self.driver.close_session(&session).await {
            warn!(session = %session, error = %err, "failed to close browser session");
        }

        let url = outcome.map_err(|_| PrototypingError::Timeout {
            after: self.script.timeout,
        })??;
        info!(repository_url = %url.redacted(), "prototype exported");
        Ok(url)
    }
}
