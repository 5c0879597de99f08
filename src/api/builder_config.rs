use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::{AssemblerSettings, ChartConfig, ChartOptions};

/// Public builder bootstrap configuration.
///
/// Serializable so host applications can load a chart setup from JSON without
/// inventing their own format. The builder never writes it back.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBuilderConfig {
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub options: ChartOptions,
    #[serde(default)]
    pub assembler: AssemblerSettings,
}

impl ChartBuilderConfig {
    #[must_use]
    pub fn new(chart: ChartConfig) -> Self {
        Self {
            chart,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_assembler(mut self, assembler: AssemblerSettings) -> Self {
        self.assembler = assembler;
        self
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize builder config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse builder config: {e}")))
    }
}
