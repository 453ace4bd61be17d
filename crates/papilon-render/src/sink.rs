use crate::error::Result;
use crate::figure::Figure;
use crate::image_out::write_png;
use std::path::{Path, PathBuf};
use tracing::info;

/// Destination for finished figures: a window, a file, a test buffer.
pub trait FigureSink {
    fn present(&mut self, figure: &Figure) -> Result<()>;
}

/// Writes each presented figure to a PNG file, replacing earlier output.
#[derive(Debug, Clone)]
pub struct PngSink {
    path: PathBuf,
}

impl PngSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FigureSink for PngSink {
    fn present(&mut self, figure: &Figure) -> Result<()> {
        write_png(&self.path, &figure.image)?;
        info!(
            path = %self.path.display(),
            title = %figure.title,
            width = figure.image.width(),
            height = figure.image.height(),
            "wrote figure"
        );
        Ok(())
    }
}

/// Keeps presented figures in memory.
#[derive(Debug, Clone, Default)]
pub struct FigureBuffer {
    figures: Vec<Figure>,
}

impl FigureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn last(&self) -> Option<&Figure> {
        self.figures.last()
    }

    pub fn into_figures(self) -> Vec<Figure> {
        self.figures
    }
}

impl FigureSink for FigureBuffer {
    fn present(&mut self, figure: &Figure) -> Result<()> {
        self.figures.push(figure.clone());
        Ok(())
    }
}
