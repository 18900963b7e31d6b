//! Desktop editor connector built from simulated keystrokes.

use crate::config::DesktopSettings;
use crate::connector::{
    domain::{Key, KeyChord, Platform},
    ports::{
        DesktopConnector, DesktopError, DesktopResult, InputError, InputFocus, InputSimulator,
    },
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Command palette entry that opens an untitled file.
const NEW_FILE_COMMAND: &str = "> File: New File";

/// Desktop connector driving the editor through an [`InputSimulator`].
///
/// Every simulated input is followed by the configured step pause, giving
/// the editor time to react. Focusing goes through the system launcher.
#[derive(Debug, Clone)]
pub struct KeystrokeDesktopConnector<S>
where
    S: InputSimulator,
{
    simulator: S,
    platform: Platform,
    settings: DesktopSettings,
}

impl<S> KeystrokeDesktopConnector<S>
where
    S: InputSimulator,
{
    /// Creates a connector for the current platform.
    #[must_use]
    pub const fn new(simulator: S, settings: DesktopSettings) -> Self {
        Self::for_platform(simulator, Platform::current(), settings)
    }

    /// Creates a connector using `platform`'s shortcuts.
    #[must_use]
    pub const fn for_platform(simulator: S, platform: Platform, settings: DesktopSettings) -> Self {
        Self {
            simulator,
            platform,
            settings,
        }
    }

    async fn chord(&self, operation: &'static str, chord: KeyChord) -> DesktopResult<()> {
        let result = self.simulator.chord(&chord).await;
        self.settle(operation, result).await
    }

    async fn type_text(&self, operation: &'static str, text: &str) -> DesktopResult<()> {
        let result = self.simulator.type_text(text).await;
        self.settle(operation, result).await
    }

    async fn paste(&self, operation: &'static str, text: &str) -> DesktopResult<()> {
        let copied = self.simulator.set_clipboard(text).await;
        self.settle(operation, copied).await?;
        self.chord(operation, self.platform.shortcut('v')).await
    }

    async fn settle(
        &self,
        operation: &'static str,
        result: Result<(), InputError>,
    ) -> DesktopResult<()> {
        result.map_err(|source| DesktopError::Input { operation, source })?;
        pause(self.settings.step_pause).await;
        Ok(())
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

fn launcher_chord(platform: Platform) -> KeyChord {
    match platform {
        Platform::MacOs => KeyChord::new([Key::Super, Key::Space]),
        Platform::Other => KeyChord::new([Key::Super]),
    }
}

#[async_trait]
impl<S> DesktopConnector for KeystrokeDesktopConnector<S>
where
    S: InputSimulator,
{
    async fn focus_application(&self, _focus: &InputFocus) -> DesktopResult<()> {
        const OPERATION: &str = "focus_application";
        debug!(application = %self.settings.application_name, "focusing editor");
        self.chord(OPERATION, launcher_chord(self.platform)).await?;
        self.type_text(OPERATION, &self.settings.application_name)
            .await?;
        self.chord(OPERATION, KeyChord::new([Key::Enter])).await?;
        pause(self.settings.launch_pause).await;
        Ok(())
    }

    async fn open_integrated_terminal(&self, _focus: &InputFocus) -> DesktopResult<()> {
        self.chord(
            "open_integrated_terminal",
            KeyChord::new([Key::Control, Key::Backtick]),
        )
        .await
    }

    async fn create_file(
        &self,
        _focus: &InputFocus,
        name: &str,
        content: &str,
    ) -> DesktopResult<()> {
        const OPERATION: &str = "create_file";
        debug!(file = name, "creating file through the editor");
        self.chord(OPERATION, self.platform.shortcut('p')).await?;
        self.type_text(OPERATION, NEW_FILE_COMMAND).await?;
        self.chord(OPERATION, KeyChord::new([Key::Enter])).await?;
        self.paste(OPERATION, content).await?;
        self.chord(OPERATION, self.platform.shortcut('s')).await?;
        self.type_text(OPERATION, name).await?;
        self.chord(OPERATION, KeyChord::new([Key::Enter])).await
    }

    async fn deliver_text_to_chat(&self, _focus: &InputFocus, text: &str) -> DesktopResult<()> {
        const OPERATION: &str = "deliver_text_to_chat";
        self.chord(OPERATION, self.platform.shortcut('l')).await?;
        // The chat panel animates open before it accepts a paste.
        pause(self.settings.step_pause).await;
        self.paste(OPERATION, text).await
    }
}

#[cfg(test)]
mod tests {
    use super::{KeystrokeDesktopConnector, NEW_FILE_COMMAND};
    use crate::config::DesktopSettings;
    use crate::connector::adapters::memory::{InputEvent, RecordingInputSimulator};
    use crate::connector::domain::{Key, KeyChord, Platform};
    use crate::connector::ports::{DesktopConnector, DesktopError, InputFocus};
    use rstest::rstest;

    fn chord<const N: usize>(keys: [Key; N]) -> InputEvent {
        InputEvent::Chord(KeyChord::new(keys))
    }

    fn connector(
        simulator: &RecordingInputSimulator,
        platform: Platform,
    ) -> KeystrokeDesktopConnector<RecordingInputSimulator> {
        KeystrokeDesktopConnector::for_platform(
            simulator.clone(),
            platform,
            DesktopSettings::immediate("Cursor"),
        )
    }

    #[rstest]
    #[case(Platform::MacOs, chord([Key::Super, Key::Space]))]
    #[case(Platform::Other, chord([Key::Super]))]
    #[tokio::test]
    async fn focus_goes_through_the_system_launcher(
        #[case] platform: Platform,
        #[case] launcher: InputEvent,
    ) {
        let simulator = RecordingInputSimulator::new();
        let focus = InputFocus::acquire().await;

        connector(&simulator, platform)
            .focus_application(&focus)
            .await
            .expect("focus");

        assert_eq!(
            simulator.events(),
            vec![
                launcher,
                InputEvent::Type("Cursor".to_owned()),
                chord([Key::Enter]),
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn chat_delivery_pastes_without_sending() {
        let simulator = RecordingInputSimulator::new();
        let focus = InputFocus::acquire().await;

        connector(&simulator, Platform::Other)
            .deliver_text_to_chat(&focus, "Implement the backend")
            .await
            .expect("chat");

        assert_eq!(
            simulator.events(),
            vec![
                chord([Key::Control, Key::Char('l')]),
                InputEvent::Clipboard("Implement the backend".to_owned()),
                chord([Key::Control, Key::Char('v')]),
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn file_creation_uses_the_command_palette_and_saves() {
        let simulator = RecordingInputSimulator::new();
        let focus = InputFocus::acquire().await;

        connector(&simulator, Platform::MacOs)
            .create_file(&focus, "notes.md", "# Notes")
            .await
            .expect("create file");

        assert_eq!(
            simulator.events(),
            vec![
                chord([Key::Super, Key::Char('p')]),
                InputEvent::Type(NEW_FILE_COMMAND.to_owned()),
                chord([Key::Enter]),
                InputEvent::Clipboard("# Notes".to_owned()),
                chord([Key::Super, Key::Char('v')]),
                chord([Key::Super, Key::Char('s')]),
                InputEvent::Type("notes.md".to_owned()),
                chord([Key::Enter]),
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn simulator_failures_name_the_operation() {
        let simulator = RecordingInputSimulator::new().failing_after(0);
        let focus = InputFocus::acquire().await;

        let result = connector(&simulator, Platform::Other)
            .open_integrated_terminal(&focus)
            .await;

        assert!(matches!(
            result,
            Err(DesktopError::Input { operation: "open_integrated_terminal", .. })
        ));
    }
}
