//! Gaussian point-spread-function integrals.

use std::f64::consts::PI;

/// Fraction of a centred Gaussian PSF falling in one binned pixel.
///
/// The `xbin` x `ybin` footprint is split into unit pixels, each sampled on an
/// `ndiv` x `ndiv` grid of sub-cell centres. `sigma` is in unbinned pixels.
pub fn peak_pixel_fraction(sigma: f64, xbin: u32, ybin: u32, ndiv: u32) -> f64 {
    let n = ndiv as f64;
    let mut sum = 0.0;
    for iyp in 0..ybin {
        let yoff = -(ybin as f64) / 2.0 + iyp as f64;
        for ixp in 0..xbin {
            let xoff = -(xbin as f64) / 2.0 + ixp as f64;
            for iys in 0..ndiv {
                let y = (yoff + (iys as f64 + 0.5) / n) / sigma;
                for ixs in 0..ndiv {
                    let x = (xoff + (ixs as f64 + 0.5) / n) / sigma;
                    sum += (-(x * x + y * y) / 2.0).exp();
                }
            }
        }
    }
    sum / (2.0 * PI * sigma.powi(2) * n.powi(2))
}

/// Fraction of a Gaussian PSF enclosed by a circular aperture of radius
/// `aperture_scale` times the FWHM.
pub fn aperture_fraction(efac: f64, aperture_scale: f64) -> f64 {
    1.0 - (-(efac * aperture_scale).powi(2) / 2.0).exp()
}
