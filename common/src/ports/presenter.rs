/// Output surface of the discovery loop.
///
/// `render_block` replaces everything previously drawn; `render_status`
/// only rewrites the single status line below it.
pub trait Presenter {
    fn render_block(&mut self, block: &str);
    fn render_status(&mut self, line: &str);
}

/// Presenter that remembers everything it was asked to draw.
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    pub blocks: Vec<String>,
    pub statuses: Vec<String>,
}

impl Presenter for RecordingPresenter {
    fn render_block(&mut self, block: &str) {
        self.blocks.push(block.to_string());
    }

    fn render_status(&mut self, line: &str) {
        self.statuses.push(line.to_string());
    }
}
