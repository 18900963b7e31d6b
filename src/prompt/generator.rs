//! Template-backed prompt generation.

use super::{PromptKind, PromptText};
use crate::mission::domain::Mission;
use minijinja::{Environment, UndefinedBehavior, context};
use thiserror::Error;

/// Errors raised while compiling or rendering prompt templates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PromptError {
    /// A template failed to compile.
    #[error("prompt template '{kind}' failed to compile: {reason}")]
    Compile {
        /// Template that failed.
        kind: PromptKind,
        /// Compiler message.
        reason: String,
    },

    /// A template failed to render.
    #[error("prompt template '{kind}' failed to render: {reason}")]
    Render {
        /// Template that failed.
        kind: PromptKind,
        /// Renderer message.
        reason: String,
    },
}

/// Renders mission prompts from the built-in templates.
///
/// Rendering is deterministic and has no side effects: the same mission and
/// kind always yield the same text.
#[derive(Debug)]
pub struct PromptGenerator {
    environment: Environment<'static>,
}

impl PromptGenerator {
    /// Compiles every built-in template.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Compile`] when a template is malformed.
    pub fn new() -> Result<Self, PromptError> {
        let mut environment = Environment::new();
        environment.set_undefined_behavior(UndefinedBehavior::Strict);
        for kind in PromptKind::ALL {
            environment
                .add_template(kind.as_str(), kind.template_source())
                .map_err(|error| PromptError::Compile {
                    kind,
                    reason: error.to_string(),
                })?;
        }
        Ok(Self { environment })
    }

    /// Renders the prompt of `kind` for `mission`.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Render`] when the template cannot be rendered.
    pub fn render(&self, mission: &Mission, kind: PromptKind) -> Result<PromptText, PromptError> {
        let render_error = |error: minijinja::Error| PromptError::Render {
            kind,
            reason: error.to_string(),
        };
        self.environment
            .get_template(kind.as_str())
            .and_then(|template| {
                template.render(context! {
                    name => mission.name().as_str(),
                    description => mission.description(),
                })
            })
            .map(PromptText::new)
            .map_err(render_error)
    }
}

/// Every prompt of one mission, rendered up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSet {
    prototyping_brief: PromptText,
    editor_policy: PromptText,
    backend_brief: PromptText,
    audit_checklist: PromptText,
}

impl PromptSet {
    /// Renders all prompt kinds for `mission`.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError`] when any template fails to render.
    pub fn for_mission(generator: &PromptGenerator, mission: &Mission) -> Result<Self, PromptError> {
        Ok(Self {
            prototyping_brief: generator.render(mission, PromptKind::PrototypingBrief)?,
            editor_policy: generator.render(mission, PromptKind::EditorPolicy)?,
            backend_brief: generator.render(mission, PromptKind::BackendBrief)?,
            audit_checklist: generator.render(mission, PromptKind::AuditChecklist)?,
        })
    }

    /// Returns the prompt of `kind`.
    #[must_use]
    pub const fn get(&self, kind: PromptKind) -> &PromptText {
        match kind {
            PromptKind::PrototypingBrief => &self.prototyping_brief,
            PromptKind::EditorPolicy => &self.editor_policy,
            PromptKind::BackendBrief => &self.backend_brief,
            PromptKind::AuditChecklist => &self.audit_checklist,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PromptGenerator, PromptSet};
    use crate::mission::domain::Mission;
    use crate::prompt::PromptKind;
    use rstest::{fixture, rstest};

    #[fixture]
    fn generator() -> PromptGenerator {
        PromptGenerator::new().expect("built-in templates compile")
    }

    #[fixture]
    fn mission() -> Mission {
        Mission::from_input("blog-app", "A personal blog with comments").expect("valid mission")
    }

    #[rstest]
    #[case(PromptKind::PrototypingBrief)]
    #[case(PromptKind::EditorPolicy)]
    #[case(PromptKind::BackendBrief)]
    #[case(PromptKind::AuditChecklist)]
    fn rendering_is_deterministic(
        generator: PromptGenerator,
        mission: Mission,
        #[case] kind: PromptKind,
    ) {
        let first = generator.render(&mission, kind).expect("render");
        let second = generator.render(&mission, kind).expect("render");
        assert_eq!(first, second);
        assert!(!first.as_str().trim().is_empty());
    }

    #[rstest]
    fn briefs_interpolate_mission_parameters(generator: PromptGenerator, mission: Mission) {
        let prototyping = generator
            .render(&mission, PromptKind::PrototypingBrief)
            .expect("render");
        let backend = generator
            .render(&mission, PromptKind::BackendBrief)
            .expect("render");

        assert!(prototyping.as_str().contains("- Name: blog-app"));
        assert!(prototyping.as_str().contains("A personal blog with comments"));
        assert!(backend.as_str().contains("Project blog-app."));
        assert!(backend
            .as_str()
            .contains("the following feature: A personal blog with comments"));
    }

    #[rstest]
    fn audit_checklist_does_not_vary_by_mission(generator: PromptGenerator, mission: Mission) {
        let other = Mission::from_input("shop", "An online shop").expect("valid mission");
        assert_eq!(
            generator.render(&mission, PromptKind::AuditChecklist).expect("render"),
            generator.render(&other, PromptKind::AuditChecklist).expect("render"),
        );
    }

    #[rstest]
    fn description_markup_is_not_escaped(generator: PromptGenerator) {
        let mission = Mission::from_input("shop", "Cart <b>&</b> checkout").expect("valid");
        let brief = generator
            .render(&mission, PromptKind::PrototypingBrief)
            .expect("render");
        assert!(brief.as_str().contains("Cart <b>&</b> checkout"));
    }

    #[rstest]
    fn prompt_set_matches_individual_renders(generator: PromptGenerator, mission: Mission) {
        let set = PromptSet::for_mission(&generator, &mission).expect("render all");
        for kind in PromptKind::ALL {
            assert_eq!(
                set.get(kind),
                &generator.render(&mission, kind).expect("render")
            );
        }
    }
}
