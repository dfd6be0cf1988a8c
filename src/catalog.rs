//! Static option catalogs shown at each wizard step
//!
//! Catalogs are read-only lookup tables. The task catalog is keyed by the
//! business domain derived from the module picked on the landing screen; the
//! remaining catalogs are shared by every domain.

mod data;

use crate::state_machine::WizardStep;
use serde::Serialize;

/// Reserved task option: the user wants to type a custom task
pub const CUSTOM_TASK_ID: &str = "custom-task";
/// Reserved goal option: answer the guide question before the summary
pub const GOAL_GUIDE_ID: &str = "goal-guide";
/// Reserved goal option: go straight to the summary
pub const GOAL_SKIP_ID: &str = "goal-skip";

/// A selectable option. Which descriptive fields are present depends on the
/// catalog: tasks carry a description and badge, the planning catalogs carry
/// a sub-label and an explanatory insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogOption {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefit: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<&'static str>,
}

/// Entry on the landing screen's module selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// Business domain used to pick the task catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    DataAnalytics,
    Ai,
    Default,
}

impl Domain {
    /// Classify a module string by case-insensitive keyword match.
    ///
    /// `data` is checked before `ai`, so "data-ai" counts as data analytics.
    pub fn classify(module: &str) -> Self {
        let module = module.to_lowercase();
        if module.contains("data") {
            Domain::DataAnalytics
        } else if module.contains("ai") {
            Domain::Ai
        } else {
            Domain::Default
        }
    }
}

/// Read-only source of option lists
pub trait OptionCatalog: Send + Sync {
    fn tasks(&self, domain: Domain) -> &[CatalogOption];
    fn time_estimates(&self) -> &[CatalogOption];
    fn team_suggestions(&self) -> &[CatalogOption];
    fn budget_tiers(&self) -> &[CatalogOption];
    fn modules(&self) -> &[ModuleEntry];

    /// Options offered at `step`, reserved entries included.
    ///
    /// Free-text-only steps return an empty list.
    fn options_for(&self, step: WizardStep, domain: Domain) -> Vec<CatalogOption> {
        match step {
            WizardStep::Task => {
                let mut options = self.tasks(domain).to_vec();
                options.push(data::CUSTOM_TASK);
                options
            }
            WizardStep::Time => self.time_estimates().to_vec(),
            WizardStep::Team => self.team_suggestions().to_vec(),
            WizardStep::Budget => self.budget_tiers().to_vec(),
            WizardStep::Goal => data::GOAL_CHOICES.to_vec(),
            WizardStep::Init | WizardStep::GoalQna | WizardStep::Summary => Vec::new(),
        }
    }

    /// Find an option by id among the options offered at `step`
    fn find(&self, step: WizardStep, domain: Domain, id: &str) -> Option<CatalogOption> {
        self.options_for(step, domain)
            .into_iter()
            .find(|option| option.id == id)
    }
}

/// The hardcoded catalogs shipped with the product
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalog;

impl OptionCatalog for StaticCatalog {
    fn tasks(&self, domain: Domain) -> &[CatalogOption] {
        match domain {
            Domain::DataAnalytics => data::DATA_ANALYTICS_TASKS,
            Domain::Ai => data::AI_TASKS,
            Domain::Default => data::DEFAULT_TASKS,
        }
    }

    fn time_estimates(&self) -> &[CatalogOption] {
        data::TIME_ESTIMATES
    }

    fn team_suggestions(&self) -> &[CatalogOption] {
        data::TEAM_SUGGESTIONS
    }

    fn budget_tiers(&self) -> &[CatalogOption] {
        data::BUDGET_TIERS
    }

    fn modules(&self) -> &[ModuleEntry] {
        data::MODULES
    }
}
