//! Synthetic calculator source with the structure of `dp.js`.
//!
//! Cell values are derived from their coordinates so lookups can be checked
//! without the published data: every PI cell is distinct, every mold cell
//! inside the mold domain is non-zero, and EMC cells carry one decimal.

use std::fmt::Write as _;

/// PI axes: temperature `-23..=65`, humidity `6..=95`.
pub const PI_TEMPS: (i32, i32) = (-23, 65);
pub const PI_RHS: (i32, i32) = (6, 95);
/// EMC axes: temperature `-20..=65`, humidity `0..=100`.
pub const EMC_TEMPS: (i32, i32) = (-20, 65);
pub const EMC_RHS: (i32, i32) = (0, 100);
/// Mold axes: temperature `2..=45`, humidity `65..=100`.
pub const MOLD_TEMPS: (i32, i32) = (2, 45);
pub const MOLD_RHS: (i32, i32) = (65, 100);

pub fn pi_value(t: i32, rh: i32) -> i32 {
    (t - PI_TEMPS.0) * 100 + (rh - PI_RHS.0)
}

pub fn mold_value(t: i32, rh: i32) -> i32 {
    (t - MOLD_TEMPS.0) * 100 + (rh - MOLD_RHS.0) + 1
}

pub fn emc_value(t: i32, rh: i32) -> f64 {
    let tenths = ((t - EMC_TEMPS.0) * 101 + rh) % 300;
    f64::from(tenths) / 10.0
}

const HEADER: &str = "\
// Dew point calculator (synthetic tables)
var pitable = new Array(9594);
var emctable = new Array(8686);

var pi = function(t,rh) { return pitable[((t<-23 ? -23 : t>65 ? 65 : Math.round(t))+23) * 90 + (rh<6 ? 6 : rh>95 ? 95 : Math.round(rh)) - 6]; };
var mold = function(t,rh) { if(t > 45 || t < 2 || rh < 65) return 0; return pitable[8010 + (Math.round(t) - 2) * 36 + Math.round(rh) - 65]; };
var emc = function(t,rh) { return emctable[(Math.max(-20,Math.min(65,Math.round(t)))+20) * 101 + Math.round(rh)] };
";

/// Full synthetic `dp.js` text.
pub fn synthetic_source() -> String {
    let mut pi = Vec::with_capacity(9594);
    for t in PI_TEMPS.0..=PI_TEMPS.1 {
        for rh in PI_RHS.0..=PI_RHS.1 {
            pi.push(pi_value(t, rh).to_string());
        }
    }
    for t in MOLD_TEMPS.0..=MOLD_TEMPS.1 {
        for rh in MOLD_RHS.0..=MOLD_RHS.1 {
            pi.push(mold_value(t, rh).to_string());
        }
    }

    let mut emc = Vec::with_capacity(8686);
    for t in EMC_TEMPS.0..=EMC_TEMPS.1 {
        for rh in EMC_RHS.0..=EMC_RHS.1 {
            emc.push(format!("{:.1}", emc_value(t, rh)));
        }
    }

    let mut out = String::from(HEADER);
    let _ = writeln!(out, "pitable = [{}];", pi.join(","));
    let _ = writeln!(out, "emctable = [{}];", emc.join(","));
    out
}
