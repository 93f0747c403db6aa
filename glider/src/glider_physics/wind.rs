use rand::Rng;

use crate::{Vec2f, WindSpec};

/// Draw one wind sample: the mean wind plus an independent uniform gust on
/// each horizontal axis. Calm-gust specs never touch the generator, so a
/// gust-free run is independent of the seed.
pub fn sample_wind<R: Rng>(wind: &WindSpec, rng: &mut R) -> Vec2f {
    if wind.gust_mps <= 0.0 {
        return wind.mean;
    }
    let gust = wind.gust_mps;
    let gx = rng.gen_range(-gust..=gust);
    let gy = rng.gen_range(-gust..=gust);
    wind.mean + Vec2f::new(gx, gy)
}
