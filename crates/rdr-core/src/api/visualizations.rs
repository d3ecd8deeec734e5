use crate::api::client::RedashClient;
use crate::api::models::VisualizationParams;
use crate::core::visualization::build_visualization;
use serde_json::Value;

impl RedashClient {
    /// Build the visualization payload and post it. Invalid parameters fail
    /// before any request is sent.
    pub async fn create_visualization(&self, params: &VisualizationParams) -> crate::Result<Value> {
        let request = build_visualization(params)?;
        log::debug!(
            "Creating {} visualization '{}' for query {}",
            request.visualization_type,
            request.name,
            request.query_id
        );

        Ok(self.post("visualizations", &request).await?)
    }
}
