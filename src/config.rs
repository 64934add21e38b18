use bon::Builder;

/// Configuration for a single analysis run
///
/// Bundles the ordered population list, the stratum the cohort is drawn
/// from, the two accepted response values with their display labels, and the
/// significance threshold. Separate strata or thresholds can be analyzed in
/// one process by building separate configurations.
#[derive(Debug, Clone, Builder)]
pub struct AnalysisConfig {
    /// Ordered population column names; results are reported in this order
    #[builder(default = default_populations())]
    pub populations: Vec<String>,
    #[builder(default = String::from("tr1"))]
    pub treatment: String,
    #[builder(default = String::from("PBMC"))]
    pub sample_type: String,
    #[builder(default = String::from("melanoma"))]
    pub condition: String,
    #[builder(default = String::from("y"))]
    pub responder_value: String,
    #[builder(default = String::from("n"))]
    pub non_responder_value: String,
    #[builder(default = String::from("Responder"))]
    pub responder_label: String,
    #[builder(default = String::from("Non-responder"))]
    pub non_responder_label: String,
    #[builder(default = 0.05)]
    pub significance_threshold: f64,
}

fn default_populations() -> Vec<String> {
    ["b_cell", "cd8_t_cell", "cd4_t_cell", "nk_cell", "monocyte"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl AnalysisConfig {
    /// True for records whose response value belongs to either group
    pub fn accepts_response(&self, response: &str) -> bool {
        response == self.responder_value || response == self.non_responder_value
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
