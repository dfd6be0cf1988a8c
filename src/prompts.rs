//! Assistant prompt templates and their rendering
//!
//! Templates interpolate earlier answers with `{field}` placeholders. Stored
//! option ids are shown by their catalog label; free text is shown as typed.

use crate::catalog::{Domain, OptionCatalog};
use crate::state_machine::{ConfigField, StrategyConfig, WizardStep};
use thiserror::Error;

/// Opening line, posted before anything else
pub const GREETING: &str = "Hola. Soy MIPE, tu arquitecto de transformación digital.";

const TASK_PROMPT: &str =
    "Perfecto, trabajaremos en {module}. ¿Qué iniciativa quieres impulsar primero?";

const CUSTOM_TASK_PROMPT: &str =
    "Cuéntame con tus palabras qué tarea necesitas resolver.";

const TIME_PROMPT: &str =
    "Excelente elección: {task}. ¿En qué plazo necesitas tenerlo listo?";

const TIME_ACK: &str =
    "Anotado: \"{timeframe}\". Ajustaré la planificación a ese plazo.";

const TEAM_PROMPT: &str =
    "Con un plazo de {timeframe}, ¿qué tamaño de equipo imaginas?";

const BUDGET_PROMPT: &str =
    "Equipo de {team_size}. ¿Con qué presupuesto cuentas para {task}?";

const GOAL_PROMPT: &str =
    "Presupuesto {budget} registrado. Definamos el objetivo principal de {task}.";

const GOAL_QNA_PROMPT: &str =
    "¿Qué resultado concreto debería lograr {task} para considerarlo un éxito?";

const SUMMARY_PROMPT: &str = "Resumen de tu estrategia:
- Área: {module}
- Tarea: {task}
- Plazo: {timeframe}
- Equipo: {team_size}
- Presupuesto: {budget}
- Objetivo: {goal}
Con esto prepararé tu plan de acción.";

const SUMMARY_PROMPT_NO_GOAL: &str = "Resumen de tu estrategia:
- Área: {module}
- Tarea: {task}
- Plazo: {timeframe}
- Equipo: {team_size}
- Presupuesto: {budget}
Con esto prepararé tu plan de acción.";

/// Errors while building a prompt
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("template references unset field `{0}`")]
    MissingField(&'static str),
    #[error("template references unknown placeholder `{0}`")]
    UnknownPlaceholder(String),
    #[error("unclosed placeholder at byte {0}")]
    Malformed(usize),
    #[error("no prompt is defined for step {0}")]
    NoPrompt(WizardStep),
    #[error("field `{0}` is already answered")]
    AlreadyAnswered(&'static str),
}

/// Prompt shown when `step` becomes current
pub fn prompt_for(
    step: WizardStep,
    config: &StrategyConfig,
    catalog: &dyn OptionCatalog,
) -> Result<String, PromptError> {
    let template = match step {
        WizardStep::Init => return Err(PromptError::NoPrompt(step)),
        WizardStep::Task => TASK_PROMPT,
        WizardStep::Time => TIME_PROMPT,
        WizardStep::Team => TEAM_PROMPT,
        WizardStep::Budget => BUDGET_PROMPT,
        WizardStep::Goal => GOAL_PROMPT,
        WizardStep::GoalQna => GOAL_QNA_PROMPT,
        WizardStep::Summary if config.goal.is_some() => SUMMARY_PROMPT,
        WizardStep::Summary => SUMMARY_PROMPT_NO_GOAL,
    };
    render(template, config, catalog)
}

/// Re-prompt after the custom task option
pub fn custom_task_prompt() -> &'static str {
    CUSTOM_TASK_PROMPT
}

/// Acknowledgement for a free-typed timeframe, posted before the advance
pub fn timeframe_ack(
    text: &str,
    config: &StrategyConfig,
    catalog: &dyn OptionCatalog,
) -> Result<String, PromptError> {
    let mut preview = config.clone();
    preview.timeframe = Some(text.to_string());
    render(TIME_ACK, &preview, catalog)
}

/// Substitute `{field}` placeholders in `template`
pub fn render(
    template: &str,
    config: &StrategyConfig,
    catalog: &dyn OptionCatalog,
) -> Result<String, PromptError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;

    while let Some((before, after)) = rest.split_once('{') {
        out.push_str(before);
        let (name, remainder) = after
            .split_once('}')
            .ok_or(PromptError::Malformed(offset + before.len()))?;

        let field = ConfigField::from_name(name)
            .ok_or_else(|| PromptError::UnknownPlaceholder(name.to_string()))?;
        let value = config
            .get(field)
            .ok_or(PromptError::MissingField(field.name()))?;
        out.push_str(display_value(field, value, config, catalog));

        offset += rest.len() - remainder.len();
        rest = remainder;
    }
    out.push_str(rest);
    Ok(out)
}

/// Catalog label for a stored option id, or the raw value for free text
fn display_value<'a>(
    field: ConfigField,
    value: &'a str,
    config: &StrategyConfig,
    catalog: &'a dyn OptionCatalog,
) -> &'a str {
    if field == ConfigField::Module {
        return catalog
            .modules()
            .iter()
            .find(|m| m.id == value)
            .map_or(value, |m| m.title);
    }
    let domain = Domain::classify(config.module.as_deref().unwrap_or_default());
    let options: &'a [crate::catalog::CatalogOption] = match field.source_step() {
        WizardStep::Task => catalog.tasks(domain),
        WizardStep::Time => catalog.time_estimates(),
        WizardStep::Team => catalog.team_suggestions(),
        WizardStep::Budget => catalog.budget_tiers(),
        _ => &[],
    };
    options
        .iter()
        .find(|o| o.id == value)
        .map_or(value, |o| o.label)
}
