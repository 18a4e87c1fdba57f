pub enum Message {
    Masking,
    CreatingPin(usize),
    Baking,
    Computing(usize),
}

/// Progress sink for long running phases. Reporting must never feed back
/// into algorithmic state.
pub trait Verboser {
    fn verbose(&mut self, message: Message);
}

pub struct Silent;

impl Verboser for Silent {
    fn verbose(&mut self, _: Message) {}
}
