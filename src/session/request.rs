use serde::{Deserialize, Serialize};

/// 3A convergence settings for one sweep step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergeSettings {
    /// EV compensation offset, in device steps.
    pub ev_comp: i32,
    /// Lock AE once converged.
    pub lock_ae: bool,
    /// Trigger auto-focus. Brightness sweeps skip it; a dark or bright scene
    /// can make AF convergence fail and sharpness is irrelevant to them.
    pub run_af: bool,
}

impl ConvergeSettings {
    pub fn locked_ae(ev_comp: i32) -> Self {
        Self {
            ev_comp,
            lock_ae: true,
            run_af: false,
        }
    }
}

/// Per-channel tonemap control points, `(input, output)` pairs in `[0,1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TonemapCurve {
    pub red: Vec<(f32, f32)>,
    pub green: Vec<(f32, f32)>,
    pub blue: Vec<(f32, f32)>,
}

impl TonemapCurve {
    /// Identity linear curve `[0,0] -> [1,1]` on all channels, so measured
    /// brightness is not skewed by device tone mapping.
    pub fn linear() -> Self {
        let ramp = vec![(0.0, 0.0), (1.0, 1.0)];
        Self {
            red: ramp.clone(),
            green: ramp.clone(),
            blue: ramp,
        }
    }
}

/// One capture request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureRequest {
    pub ev_comp: i32,
    pub lock_ae: bool,
    pub tonemap: TonemapCurve,
}

impl CaptureRequest {
    pub fn linear_locked(ev_comp: i32) -> Self {
        Self {
            ev_comp,
            lock_ae: true,
            tonemap: TonemapCurve::linear(),
        }
    }
}

/// Luma plane of a captured image, samples in `[0,1]`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct LumaPlane {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>,
}

impl LumaPlane {
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), (width * height) as usize);
        Self {
            width,
            height,
            data,
        }
    }

    /// Flat plane with every sample at `value`.
    pub fn flat(width: u32, height: u32, value: f32) -> Self {
        Self::new(width, height, vec![value; (width * height) as usize])
    }

    /// Mean of a normalized patch, ITS tile rule: origin cells are
    /// `ceil(norm * extent)`, patch extents are `floor(norm * extent)`.
    pub fn patch_mean(&self, xnorm: f64, ynorm: f64, wnorm: f64, hnorm: f64) -> f64 {
        let wfull = self.width as f64;
        let hfull = self.height as f64;
        let x0 = (xnorm * wfull).ceil() as u32;
        let y0 = (ynorm * hfull).ceil() as u32;
        let pw = ((wnorm * wfull).floor() as u32).min(self.width.saturating_sub(x0));
        let ph = ((hnorm * hfull).floor() as u32).min(self.height.saturating_sub(y0));
        if pw == 0 || ph == 0 {
            return 0.0;
        }

        let mut sum = 0.0f64;
        for y in y0..y0 + ph {
            let row = (y * self.width) as usize;
            for x in x0..x0 + pw {
                sum += f64::from(self.data[row + x as usize]);
            }
        }
        sum / f64::from(pw * ph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_tonemap_is_identity_ramp() {
        let curve = TonemapCurve::linear();
        assert_eq!(curve.red, vec![(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(curve.red, curve.green);
        assert_eq!(curve.green, curve.blue);
    }

    #[test]
    fn test_patch_mean_on_flat_plane() {
        let plane = LumaPlane::flat(640, 480, 0.25);
        let mean = plane.patch_mean(0.45, 0.45, 0.1, 0.1);
        assert!((mean - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_patch_mean_samples_center_only() {
        // Bright center tile on a dark plane; the 10% center patch must see
        // only the bright values.
        let width = 100u32;
        let height = 100u32;
        let mut data = vec![0.0f32; (width * height) as usize];
        for y in 45..55 {
            for x in 45..55 {
                data[y * width as usize + x] = 1.0;
            }
        }
        let plane = LumaPlane::new(width, height, data);
        let mean = plane.patch_mean(0.45, 0.45, 0.1, 0.1);
        assert!((mean - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_patch_mean_degenerate_plane() {
        let plane = LumaPlane::flat(2, 2, 0.5);
        // 10% of 2 pixels floors to zero extent.
        assert_eq!(plane.patch_mean(0.45, 0.45, 0.1, 0.1), 0.0);
    }
}
