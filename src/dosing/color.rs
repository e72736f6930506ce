use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};
use super::DoseId;

/// Picks a display colour for a newly created dose.
pub trait ColorStrategy {
    fn color_for(&mut self, id: DoseId) -> String;
}

impl<F> ColorStrategy for F
where
    F: FnMut(DoseId) -> String,
{
    fn color_for(&mut self, id: DoseId) -> String {
        self(id)
    }
}

/// Random hue at fixed saturation and lightness, e.g. `hsl(212.4, 70%, 60%)`.
pub struct RandomHue {
    rng: StdRng,
    hue: Uniform<f64>,
}

impl RandomHue {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng, hue: Uniform::new(0.0, 360.0) }
    }
}

impl ColorStrategy for RandomHue {
    fn color_for(&mut self, _id: DoseId) -> String {
        let hue = self.hue.sample(&mut self.rng);
        format!("hsl({:.1}, 70%, 60%)", hue)
    }
}

/// Cycles through a fixed list, indexed by dose id.
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn new(colors: Vec<String>) -> Self {
        Self { colors }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(
            ["#e74c3c", "#3498db", "#27ae60", "#f39c12", "#8e44ad", "#16a085"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        )
    }
}

impl ColorStrategy for Palette {
    fn color_for(&mut self, id: DoseId) -> String {
        if self.colors.is_empty() {
            return String::new();
        }
        let index = (id.saturating_sub(1) as usize) % self.colors.len();
        self.colors[index].clone()
    }
}
