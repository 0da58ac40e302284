use serde::{Deserialize, Serialize};

/// Chart styling for exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartStyles {
    /// Fill of the positive-outcome series.
    pub positive_color: String,

    /// Fill of the negative-outcome series.
    pub negative_color: String,

    /// Opacity of radar polygons.
    pub fill_opacity: f64,

    /// Bar chart canvas, in pixels.
    pub bar_width: f64,
    pub bar_height: f64,

    /// Radar chart canvas is square, in pixels.
    pub radar_size: f64,
}

impl Default for ChartStyles {
    fn default() -> Self {
        Self {
            positive_color: "#D2042D".to_string(),
            negative_color: "#228B22".to_string(),
            fill_opacity: 0.6,
            bar_width: 600.0,
            bar_height: 300.0,
            radar_size: 400.0,
        }
    }
}
