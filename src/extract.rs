//! Dominant color extraction with randomized k-means.
//!
//! Pixels are sampled at a fixed byte stride from a packed RGBA buffer,
//! translucent pixels are dropped, and the survivors are clustered in RGB
//! space with Lloyd's algorithm. Centroids start as uniform draws (with
//! replacement) from the input, so results vary between runs unless the RNG
//! is seeded.
//!
//! # Example
//!
//! ```
//! use chromakit::extract::DominantColorExtractor;
//! use chromakit::image::PixelBuffer;
//! use chromakit::color::Rgba;
//!
//! let image = PixelBuffer::filled(20, 20, Rgba::rgb(46, 139, 87)).unwrap();
//! let mut extractor = DominantColorExtractor::seeded(7);
//! let colors = extractor.extract_image(&image).unwrap();
//! assert_eq!(colors[0].color.to_hex(), "#2E8B57");
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::image::{PixelBuffer, BYTES_PER_PIXEL};

/// Default number of clusters.
pub const DEFAULT_K: usize = 8;

/// Default sampling stride in bytes (every 10th pixel).
pub const DEFAULT_STRIDE: usize = 40;

/// Pixels with alpha below this are skipped.
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 128;

/// Default number of Lloyd iterations.
pub const DEFAULT_ITERATIONS: usize = 10;

/// A cluster centroid and how many sampled pixels it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DominantColor {
    /// Centroid color.
    pub color: Rgb,
    /// Member count after the final assignment pass.
    pub count: usize,
}

/// Read every pixel at a `stride_bytes` offset, skipping translucent ones.
///
/// An incomplete trailing pixel is ignored.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `stride_bytes` is zero or not a
/// whole number of pixels.
pub fn sample_pixels(buffer: &[u8], stride_bytes: usize, alpha_threshold: u8) -> Result<Vec<Rgb>> {
    check_stride(stride_bytes)?;

    let colors = buffer
        .chunks(stride_bytes)
        .filter_map(|chunk| {
            let px = chunk.get(..BYTES_PER_PIXEL)?;
            (px[3] >= alpha_threshold).then(|| Rgb::new(px[0], px[1], px[2]))
        })
        .collect();
    Ok(colors)
}

// Misaligned strides would read channels from neighbouring pixels
fn check_stride(stride_bytes: usize) -> Result<()> {
    if stride_bytes == 0 || stride_bytes % BYTES_PER_PIXEL != 0 {
        return Err(Error::InvalidParameter {
            parameter: "stride",
            value: stride_bytes.to_string(),
        });
    }
    Ok(())
}

/// Cluster `colors` into `k` groups, largest first.
///
/// Runs exactly `iterations` assignment/update passes. Ties go to the lowest
/// centroid index and an empty cluster keeps its previous centroid. Empty
/// input yields an empty result.
///
/// Counts come from one extra assignment against the returned centroids,
/// not from the last iteration's assignment, so each count is the number
/// of samples nearest to the color it is reported with.
pub fn kmeans<R: Rng>(
    colors: &[Rgb],
    k: usize,
    iterations: usize,
    rng: &mut R,
) -> Vec<DominantColor> {
    if colors.is_empty() || k == 0 {
        return Vec::new();
    }

    let mut centroids: Vec<Rgb> = (0..k)
        .map(|_| colors[rng.random_range(0..colors.len())])
        .collect();
    let mut assignment = vec![0usize; colors.len()];

    for _ in 0..iterations {
        assign(colors, &centroids, &mut assignment);
        centroids = update(colors, &assignment, &centroids);
    }
    // Final sizes reflect the centroids actually returned
    assign(colors, &centroids, &mut assignment);

    let mut counts = vec![0usize; k];
    for &cluster in &assignment {
        counts[cluster] += 1;
    }

    let mut result: Vec<DominantColor> = centroids
        .into_iter()
        .zip(counts)
        .map(|(color, count)| DominantColor { color, count })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count));
    result
}

fn distance_sq(a: Rgb, b: Rgb) -> u32 {
    let d = |x: u8, y: u8| u32::from(x.abs_diff(y)).pow(2);
    d(a.r, b.r) + d(a.g, b.g) + d(a.b, b.b)
}

fn nearest(color: Rgb, centroids: &[Rgb]) -> usize {
    let mut best = 0;
    let mut best_distance = u32::MAX;
    for (index, &centroid) in centroids.iter().enumerate() {
        let distance = distance_sq(color, centroid);
        if distance < best_distance {
            best_distance = distance;
            best = index;
        }
    }
    best
}

fn assign(colors: &[Rgb], centroids: &[Rgb], assignment: &mut [usize]) {
    for (slot, &color) in assignment.iter_mut().zip(colors) {
        *slot = nearest(color, centroids);
    }
}

fn update(colors: &[Rgb], assignment: &[usize], previous: &[Rgb]) -> Vec<Rgb> {
    let mut sums = vec![[0u64; 3]; previous.len()];
    let mut counts = vec![0u64; previous.len()];
    for (&color, &cluster) in colors.iter().zip(assignment) {
        sums[cluster][0] += u64::from(color.r);
        sums[cluster][1] += u64::from(color.g);
        sums[cluster][2] += u64::from(color.b);
        counts[cluster] += 1;
    }

    previous
        .iter()
        .enumerate()
        .map(|(i, &old)| {
            if counts[i] == 0 {
                return old;
            }
            let mean = |sum: u64| (sum as f64 / counts[i] as f64).round() as u8;
            Rgb::new(mean(sums[i][0]), mean(sums[i][1]), mean(sums[i][2]))
        })
        .collect()
}

// ============================================================================
// Extractor
// ============================================================================

/// Extraction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Number of clusters.
    pub k: usize,
    /// Sampling stride in bytes.
    pub stride: usize,
    /// Minimum alpha for a pixel to count.
    pub alpha_threshold: u8,
    /// Lloyd iterations.
    pub iterations: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            stride: DEFAULT_STRIDE,
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl ExtractorConfig {
    /// Set the cluster count.
    #[must_use]
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Reject parameters that cannot produce a result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `k` is zero or `stride` is not
    /// a positive multiple of 4.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidParameter {
                parameter: "k",
                value: "0".to_string(),
            });
        }
        check_stride(self.stride)
    }
}

/// K-means extractor with its own RNG.
#[derive(Debug, Clone)]
pub struct DominantColorExtractor {
    config: ExtractorConfig,
    rng: StdRng,
}

impl Default for DominantColorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DominantColorExtractor {
    /// Extractor with default parameters and an OS-seeded RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default(), StdRng::from_os_rng())
    }

    /// Extractor with default parameters and a reproducible RNG.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_config(ExtractorConfig::default(), StdRng::seed_from_u64(seed))
    }

    /// Extractor with explicit parameters and RNG.
    #[must_use]
    pub fn with_config(config: ExtractorConfig, rng: StdRng) -> Self {
        Self { config, rng }
    }

    /// Current parameters.
    #[must_use]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract dominant colors from packed RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the configuration is unusable.
    pub fn extract(&mut self, buffer: &[u8]) -> Result<Vec<DominantColor>> {
        self.config.validate()?;
        let samples = sample_pixels(buffer, self.config.stride, self.config.alpha_threshold)?;
        let colors = kmeans(&samples, self.config.k, self.config.iterations, &mut self.rng);

        debug!(
            bytes = buffer.len(),
            samples = samples.len(),
            k = self.config.k,
            clusters = colors.len(),
            "extracted dominant colors"
        );
        Ok(colors)
    }

    /// Extract dominant colors from a decoded image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the configuration is unusable.
    pub fn extract_image(&mut self, image: &PixelBuffer) -> Result<Vec<DominantColor>> {
        self.extract(image.as_bytes())
    }
}

/// Extract `k` dominant colors with default sampling and a thread RNG.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `k` is zero.
pub fn extract_colors(buffer: &[u8], k: usize) -> Result<Vec<DominantColor>> {
    let config = ExtractorConfig::default().with_k(k);
    config.validate()?;
    let samples = sample_pixels(buffer, config.stride, config.alpha_threshold)?;
    Ok(kmeans(&samples, config.k, config.iterations, &mut rand::rng()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    fn rgba_pixels(colors: &[Rgba]) -> Vec<u8> {
        colors.iter().flat_map(|c| c.to_array()).collect()
    }

    #[test]
    fn test_sample_every_tenth_pixel() {
        let mut pixels = vec![Rgba::BLACK; 25];
        pixels[10] = Rgba::WHITE;
        let samples = sample_pixels(&rgba_pixels(&pixels), DEFAULT_STRIDE, DEFAULT_ALPHA_THRESHOLD).unwrap();
        assert_eq!(samples, vec![Rgb::BLACK, Rgb::WHITE, Rgb::BLACK]);
    }

    #[test]
    fn test_sample_skips_translucent() {
        let pixels = [Rgba::new(1, 1, 1, 127), Rgba::new(2, 2, 2, 128)];
        let samples = sample_pixels(&rgba_pixels(&pixels), 4, 128).unwrap();
        assert_eq!(samples, vec![Rgb::new(2, 2, 2)]);
    }

    #[test]
    fn test_sample_ignores_trailing_partial_pixel() {
        let samples = sample_pixels(&[9, 9, 9, 255, 1, 2], 4, 0).unwrap();
        assert_eq!(samples, vec![Rgb::new(9, 9, 9)]);
    }

    #[test]
    fn test_sample_zero_stride_rejected() {
        assert!(matches!(
            sample_pixels(&[0; 8], 0, 0),
            Err(Error::InvalidParameter { parameter: "stride", .. })
        ));
    }

    #[test]
    fn test_sample_misaligned_stride_rejected() {
        let pixels = rgba_pixels(&[Rgba::rgb(255, 0, 0); 20]);
        for stride in [1, 2, 3, 6, 42] {
            assert!(matches!(
                sample_pixels(&pixels, stride, 0),
                Err(Error::InvalidParameter { parameter: "stride", .. })
            ));
        }
        assert_eq!(sample_pixels(&pixels, 8, 0).unwrap().len(), 10);
    }

    #[test]
    fn test_validate_misaligned_stride() {
        let config = ExtractorConfig {
            stride: 2,
            ..ExtractorConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(ExtractorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_kmeans_empty_input() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(kmeans(&[], 8, 10, &mut rng).is_empty());
    }

    #[test]
    fn test_kmeans_red_blue_three_clusters() {
        let mut colors = vec![Rgb::RED; 30];
        colors.extend(vec![Rgb::BLUE; 20]);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = kmeans(&colors, 3, DEFAULT_ITERATIONS, &mut rng);
            assert_eq!(result.len(), 3);
            assert_eq!(result.iter().map(|d| d.count).sum::<usize>(), colors.len());
            // Even when every draw hits one color the mixed centroid splits off
            assert!(result.iter().all(|d| d.color == Rgb::RED || d.color == Rgb::BLUE));
            assert_eq!(result[0], DominantColor { color: Rgb::RED, count: 30 });
            assert_eq!(result[1], DominantColor { color: Rgb::BLUE, count: 20 });
            assert_eq!(result[2].count, 0);
        }
    }

    #[test]
    fn test_kmeans_ties_go_to_lowest_index() {
        let centroids = [Rgb::new(0, 0, 0), Rgb::new(20, 0, 0)];
        assert_eq!(nearest(Rgb::new(10, 0, 0), &centroids), 0);
        assert_eq!(nearest(Rgb::new(11, 0, 0), &centroids), 1);
    }

    #[test]
    fn test_update_rounds_mean_and_keeps_empty() {
        let colors = [Rgb::new(0, 0, 0), Rgb::new(1, 3, 255)];
        let previous = [Rgb::new(5, 5, 5), Rgb::new(99, 99, 99)];
        let next = update(&colors, &[0, 0], &previous);
        assert_eq!(next[0], Rgb::new(1, 2, 128));
        assert_eq!(next[1], Rgb::new(99, 99, 99));
    }

    #[test]
    fn test_kmeans_sorted_by_count() {
        let mut colors = vec![Rgb::new(200, 200, 0); 5];
        colors.extend(vec![Rgb::new(0, 100, 0); 40]);
        colors.extend(vec![Rgb::new(0, 0, 0); 15]);
        let mut rng = StdRng::seed_from_u64(3);
        let result = kmeans(&colors, 3, DEFAULT_ITERATIONS, &mut rng);
        assert!(result.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_counts_match_returned_centroids() {
        let colors: Vec<Rgb> = [3u8, 7, 20, 41, 90, 140, 200, 251]
            .iter()
            .flat_map(|&v| vec![Rgb::new(v, 0, 0); usize::from(v % 5) + 1])
            .collect();

        for seed in 0..20 {
            // One iteration leaves the last assignment stale
            let result = kmeans(&colors, 3, 1, &mut StdRng::seed_from_u64(seed));
            let centroids: Vec<Rgb> = result.iter().map(|d| d.color).collect();
            let ambiguous = colors.iter().any(|&c| {
                let best = centroids.iter().map(|&m| distance_sq(c, m)).min().unwrap_or(0);
                centroids.iter().filter(|&&m| distance_sq(c, m) == best).count() > 1
            });
            if ambiguous {
                continue;
            }
            for (i, dominant) in result.iter().enumerate() {
                let members = colors.iter().filter(|&&c| nearest(c, &centroids) == i).count();
                assert_eq!(dominant.count, members, "seed {seed}");
            }
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let pixels: Vec<u8> = (0..4000u32).flat_map(|i| [(i % 256) as u8, (i / 16 % 256) as u8, 77, 255]).collect();
        let a = DominantColorExtractor::seeded(42).extract(&pixels).unwrap();
        let b = DominantColorExtractor::seeded(42).extract(&pixels).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), DEFAULT_K);
    }

    #[test]
    fn test_all_transparent_is_empty() {
        let image = PixelBuffer::filled(50, 50, Rgba::new(255, 0, 0, 100)).unwrap();
        let result = DominantColorExtractor::seeded(0).extract_image(&image).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_extract_colors_rejects_zero_k() {
        assert!(matches!(
            extract_colors(&[0, 0, 0, 255], 0),
            Err(Error::InvalidParameter { parameter: "k", .. })
        ));
    }

    #[test]
    fn test_extract_colors_uniform_image() {
        let image = PixelBuffer::filled(30, 30, Rgba::rgb(46, 139, 87)).unwrap();
        let result = extract_colors(image.as_bytes(), 4).unwrap();
        assert_eq!(result.len(), 4);
        assert!(result.iter().all(|d| d.color == Rgb::new(46, 139, 87)));
        assert_eq!(result[0].count, 90);
    }
}
