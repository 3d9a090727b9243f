//! Fixed category weights for fusing per-category scores

use crate::stack::SignalCategory;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryWeights {
    pub framework_file: f64,
    pub dependency: f64,
    pub build_config: f64,
    pub environment: f64,
}

impl CategoryWeights {
    pub const STANDARD: CategoryWeights = CategoryWeights {
        framework_file: 0.40,
        dependency: 0.30,
        build_config: 0.20,
        environment: 0.10,
    };

    pub fn weight(&self, category: SignalCategory) -> f64 {
        match category {
            SignalCategory::FrameworkFile => self.framework_file,
            SignalCategory::Dependency => self.dependency,
            SignalCategory::BuildConfig => self.build_config,
            SignalCategory::Environment => self.environment,
        }
    }

    pub fn total(&self) -> f64 {
        SignalCategory::ALL
            .iter()
            .map(|&category| self.weight(category))
            .sum()
    }
}
