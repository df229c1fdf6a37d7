use lbol_stats::{ChartSink, PlotSpec, SeriesOverride};
use std::convert::Infallible;

/// Chart sink that keeps every call for inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub plots: Vec<PlotSpec>,
    pub restyles: Vec<Vec<SeriesOverride>>,
}

impl RecordingSink {
    #[must_use]
    pub fn last_restyle(&self) -> Option<&[SeriesOverride]> {
        self.restyles.last().map(Vec::as_slice)
    }
}

impl ChartSink for RecordingSink {
    type Error = Infallible;

    fn create_plot(&mut self, spec: &PlotSpec) -> Result<(), Self::Error> {
        self.plots.push(spec.clone());
        Ok(())
    }

    fn restyle(&mut self, overrides: &[SeriesOverride]) -> Result<(), Self::Error> {
        self.restyles.push(overrides.to_vec());
        Ok(())
    }

    fn resize(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
