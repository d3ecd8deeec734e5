//! Dashboard and widget operations

use crate::api::client::RedashClient;
use crate::api::models::{
    AddWidgetParams, CreateWidgetRequest, Dashboard, DashboardList, DashboardSummary,
    ShareResponse, UpdateDashboardRequest, WidgetOptions, WidgetPosition,
};
use crate::core::layout::next_widget_position;
use crate::error::ResourceNotFound;
use serde_json::{Value, json};

impl RedashClient {
    pub async fn create_dashboard(&self, name: &str) -> crate::Result<Value> {
        Ok(self.post("dashboards", &json!({ "name": name })).await?)
    }

    pub async fn list_dashboards(&self) -> crate::Result<Vec<DashboardSummary>> {
        let list: DashboardList = self.get("dashboards").await?;
        Ok(list.results)
    }

    pub async fn get_dashboard(&self, slug: &str) -> crate::Result<Dashboard> {
        Ok(self.get(&format!("dashboards/{}", slug)).await?)
    }

    /// Resolve a dashboard's slug from the dashboard listing.
    pub async fn dashboard_slug(&self, dashboard_id: u64) -> crate::Result<String> {
        self.list_dashboards()
            .await?
            .into_iter()
            .find(|d| d.id == dashboard_id)
            .map(|d| d.slug)
            .ok_or_else(|| ResourceNotFound::new("dashboard", dashboard_id).into())
    }

    /// Attach a visualization or text widget to a dashboard.
    ///
    /// Without an explicit position the widget is appended using the
    /// auto-layout policy in [`crate::core::layout`].
    pub async fn add_widget(&self, params: AddWidgetParams) -> crate::Result<Value> {
        let slug = self.dashboard_slug(params.dashboard_id).await?;

        let position = match params.position {
            Some(position) => position,
            None => self.calculate_widget_position(&slug, params.full_width).await?,
        };

        let request = CreateWidgetRequest {
            dashboard_id: params.dashboard_id,
            text: params.text,
            visualization_id: params.visualization_id,
            width: 1,
            options: WidgetOptions {
                position: Some(position),
            },
        };

        Ok(self.post("widgets", &request).await?)
    }

    pub async fn calculate_widget_position(
        &self,
        slug: &str,
        full_width: bool,
    ) -> crate::Result<WidgetPosition> {
        let dashboard = self.get_dashboard(slug).await?;
        Ok(next_widget_position(&dashboard.widgets, full_width))
    }

    /// Take a dashboard out of draft and share it. Returns the public URL if
    /// the service reports one.
    pub async fn publish_dashboard(&self, dashboard_id: u64) -> crate::Result<Option<String>> {
        let _: Value = self
            .post(
                &format!("dashboards/{}", dashboard_id),
                &UpdateDashboardRequest { is_draft: false },
            )
            .await?;

        let share: ShareResponse = self
            .post(&format!("dashboards/{}/share", dashboard_id), &json!({}))
            .await?;

        Ok(share.public_url)
    }

    /// Queries behind the visualization widgets of a dashboard, in widget order.
    pub async fn get_dashboard_queries(&self, slug: &str) -> crate::Result<Vec<Value>> {
        let dashboard = self.get_dashboard(slug).await?;

        Ok(dashboard
            .widgets
            .into_iter()
            .filter_map(|widget| widget.visualization.and_then(|v| v.query))
            .collect())
    }
}
