//! HTTP renderer backed by a kroki server.

use std::time::Duration;

use log::{debug, info};

use super::{RenderError, Renderer};

/// Renders diagram code by POSTing it to `{endpoint}/structurizr/svg`.
#[derive(Debug)]
pub struct KrokiRenderer {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl KrokiRenderer {
    /// Creates a renderer for the given kroki endpoint (e.g.
    /// `https://kroki.io` or a self-hosted instance).
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Http`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, RenderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(KrokiRenderer {
            endpoint: endpoint.into(),
            client,
        })
    }

    fn render_url(&self) -> String {
        format!("{}/structurizr/svg", self.endpoint.trim_end_matches('/'))
    }
}

impl Renderer for KrokiRenderer {
    fn render_svg(&self, code: &str) -> Result<String, RenderError> {
        let url = self.render_url();
        info!(url = url; "Rendering diagram via kroki");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(code.to_string())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            // Kroki reports DSL errors in the response body.
            let body = response.text().unwrap_or_default();
            return Err(RenderError::Status { status, body });
        }

        let svg = response.text()?;
        debug!(svg_bytes = svg.len(); "Renderer returned SVG");
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_url_joins_endpoint_and_diagram_type() {
        let renderer = KrokiRenderer::new("https://kroki.io", Duration::from_secs(5)).unwrap();
        assert_eq!(renderer.render_url(), "https://kroki.io/structurizr/svg");

        let renderer = KrokiRenderer::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            renderer.render_url(),
            "http://localhost:8000/structurizr/svg"
        );
    }
}
