pub mod errors;

pub use errors::{ErrorCategory, ModtranError, ModtranResult};

use serde::{Deserialize, Deserializer, de};

/// Surface reflectance: either a Lambertian albedo rendered as a numeric
/// `F6.4` slot, or one of the two named modes that switch the simulator to
/// per-pixel/per-area surface characterization and pull in card group 4A.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceReflectance {
    Albedo(f64),
    Brdf,
    Lambertian,
}

impl SurfaceReflectance {
    /// Named modes add the surface-characterization card group.
    pub const fn needs_surface_cards(&self) -> bool {
        !matches!(self, Self::Albedo(_))
    }
}

impl<'de> Deserialize<'de> for SurfaceReflectance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Albedo(f64),
            Mode(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Albedo(value) => Ok(Self::Albedo(value)),
            Raw::Mode(mode) => match mode.as_str() {
                "BRDF" => Ok(Self::Brdf),
                "LAMBER" => Ok(Self::Lambertian),
                other => Err(de::Error::custom(format!(
                    "unknown surface reflectance mode '{other}': expected a number in [0, 1], \
                     'BRDF', or 'LAMBER'"
                ))),
            },
        }
    }
}

/// User-facing run parameters. Field names follow the simulator's own
/// keyword vocabulary so values can be cross-checked against its manual.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tape5Config {
    /// Band model algorithm: 'T'/'M' plain, 'C'/'K' correlated-k.
    pub modtrn: String,
    /// Correlated-k speed: 'S' (33 absorption coefficients) or 'M' (17).
    pub speed: String,
    /// Model atmosphere index, 1-6 (user-defined profiles unsupported).
    pub model: i64,
    /// Boundary (target) temperature [K].
    pub tptemp: f64,
    /// Surface reflectance: albedo fraction, BRDF, or LAMBER.
    pub surref: SurfaceReflectance,
    /// Multiple-scattering algorithm: 'T' DISORT, 'F' Isaac 2-stream,
    /// 'S' scaled 2-stream.
    pub dis: String,
    /// Azimuth dependence within DISORT.
    pub disazm: String,
    /// DISORT stream count: 2, 4, 8, or 16.
    pub nstr: i64,
    /// CO2 mixing ratio [ppmv].
    pub co2mx: f64,
    /// Water vapor column string (free-form scaled-column syntax).
    pub h2ostr: String,
    /// Ozone column string (free-form scaled-column syntax).
    pub o3str: String,
    /// Aerosol extinction model index.
    pub ihaze: i64,
    /// Navy Oceanic Vertical Aerosol Model toggle: '' off, 'N' on.
    pub cnovam: String,
    /// Seasonal aerosol profile: 0 from model, 1 spring-summer, 2 fall-winter.
    pub iseasn: i64,
    /// Volcanic aerosol profile, 0-8.
    pub ivulcn: i64,
    /// Air mass character for NOVAM, 1-10.
    pub icstl: i64,
    /// Army Vertical Structure Algorithm toggle.
    pub ivsa: i64,
    /// Meteorological visibility [km]; 0 defers to IHAZE.
    pub vis: f64,
    /// Current wind speed [m/s].
    pub wss: f64,
    /// 24-hour average wind speed [m/s].
    pub whh: f64,
    /// Rain rate [mm/hr].
    pub rainrt: f64,
    /// Ground altitude above sea level [km].
    pub gndalt: f64,
    /// Sensor altitude [km].
    pub h1: f64,
    /// Target altitude [km]; clamped up to `gndalt` when below it.
    pub h2: f64,
    /// Zenith angle from sensor to target [deg], 180 = nadir.
    pub angle: f64,
    /// Aerosol phase function: 0 Henyey-Greenstein, 2 Mie.
    pub iph: i64,
    /// Day of year, 1-365.
    pub iday: i64,
    /// Light source: 0 sun, 1 moon.
    pub isourc: i64,
    /// Solar/lunar azimuth at the target [deg east of north].
    pub parm1: f64,
    /// Solar/lunar zenith at the target [deg].
    pub parm2: f64,
    /// Moon phase angle [deg]: 0 full, 180 none.
    pub anglem: f64,
    /// Henyey-Greenstein asymmetry factor, [0, 1].
    pub g: f64,
    /// Lowest output wavelength [micron].
    pub v1: f64,
    /// Highest output wavelength [micron].
    pub v2: f64,
    /// Output wavelength increment [micron]; the slit FWHM is `2 * dv`.
    pub dv: f64,
    /// Fixed simulator flags, overridable per field.
    pub fixed: FixedSettings,
}

impl Default for Tape5Config {
    fn default() -> Self {
        Self {
            modtrn: "M".to_string(),
            speed: "S".to_string(),
            model: 2,
            tptemp: 294.0,
            surref: SurfaceReflectance::Albedo(0.75),
            dis: "T".to_string(),
            disazm: "T".to_string(),
            nstr: 8,
            co2mx: 365.0,
            h2ostr: "0".to_string(),
            o3str: "0".to_string(),
            ihaze: 1,
            cnovam: String::new(),
            iseasn: 0,
            ivulcn: 0,
            icstl: 3,
            ivsa: 0,
            vis: 0.0,
            wss: 0.0,
            whh: 0.0,
            rainrt: 0.0,
            gndalt: 0.0,
            h1: 100.0,
            h2: 0.0,
            angle: 180.0,
            iph: 2,
            iday: 93,
            isourc: 0,
            parm1: 0.0,
            parm2: 0.0,
            anglem: 0.0,
            g: 0.5,
            v1: 0.350,
            v2: 1.000,
            dv: 0.005,
            fixed: FixedSettings::default(),
        }
    }
}

/// Flags the original wrapper pins to keep the simulator in a supported
/// configuration. They render into the same card slots as user parameters
/// but change rarely; overriding one is deliberate, not routine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixedSettings {
    /// Path type: 2 = slant path between two altitudes.
    pub itype: i64,
    /// Execution mode: 2 = thermal plus solar/lunar radiance.
    pub iemsct: i64,
    /// Multiple scattering: -1 = solar geometry taken at the target.
    pub imult: i64,
    /// Per-constituent atmosphere overrides M1-M6; 0 defers to `model`.
    pub m: [i64; 6],
    /// Heavy species profile selector.
    pub mdef: i64,
    /// Normal operation flag.
    pub im: i64,
    /// Output verbosity of the simulator's log.
    pub noprnt: i64,
    /// Read 1 cm-1 binned solar irradiance.
    pub lsun: String,
    /// FWHM [cm-1] of the irradiance smoothing function.
    pub isun: i64,
    /// Read the solar spectrum file named on card 1A1.
    pub lsunfl: String,
    /// Read the band model file named on card 1A2.
    pub lbmnam: String,
    /// Read the instrument filter file named on card 1A3.
    pub lfltnm: String,
    /// Rescale aerosol optical properties after water column scaling.
    pub h2oaer: String,
    /// Read the data directory named on card 1A4 ('T') or use the
    /// simulator default ('').
    pub ldatdr: String,
    /// Top-of-atmosphere irradiance scale factor; 0 = no scaling.
    pub solcon: i64,
    /// User-defined aerosol optical properties toggle ('' or 'A+').
    pub aplus: String,
    /// User-supplied aerosol spectra toggle ('' or 'USS').
    pub aruss: String,
    /// Cloud/rain model; only 0 (none) is supported.
    pub icld: i64,
    /// Path length [km]; 0 selects the two-altitude geometry case.
    pub range: f64,
    /// Earth-center angle [deg]; 0 selects the two-altitude geometry case.
    pub beta: f64,
    /// Earth radius [km]; '' = default radius.
    pub ro: String,
    /// Tangent path handling: 0 short, 1 long.
    pub lenn: i64,
    /// Zenith angle from target toward sensor [deg].
    pub phi: f64,
    /// Solar geometry parameterization; 12 = azimuth/zenith at target.
    pub iparm: i64,
    /// Unused for IPARM = 12.
    pub parm3: f64,
    /// Unused for IPARM = 12.
    pub parm4: f64,
    /// Greenwich time [h]; unused for IPARM = 12.
    pub time: f64,
    /// Path azimuth [deg]; unused for IPARM = 12.
    pub psipo: f64,
    /// Plot file content: 'T' transmittance, 'R' radiance.
    pub yflag: String,
    /// Plot file spectral units: 'W', 'M', or 'N'.
    pub xflag: String,
    /// Repeat-run delimiter string for the plot file.
    pub dlimit: String,
    /// Seven-character unit/slit/sampling flag string.
    pub flags: String,
    /// Atmospheric levels in the spectral flux table; 0 = all.
    pub mlflx: i64,
    /// Repeat-run option.
    pub irpt: i64,
    /// Surfaces to model when SURREF names a mode: 1 pixel, 2 pixel + area.
    pub nsurf: i64,
    /// Area-averaged ground temperature [K] for NSURF = 2.
    pub aatemp: f64,
    /// Solar spectrum file for card 1A1 (database index or filename).
    pub sunfl2: String,
    /// Band model file for card 1A2.
    pub bmname: String,
    /// Instrument filter file for card 1A3.
    pub filtnm: String,
    /// Data directory for card 1A4.
    pub datdir: String,
    /// Spectral albedo file for card 4L1.
    pub salbfl: String,
    /// Albedo curve name for card 4L2.
    pub csalb: String,
}

impl Default for FixedSettings {
    fn default() -> Self {
        Self {
            itype: 2,
            iemsct: 2,
            imult: -1,
            m: [0; 6],
            mdef: 1,
            im: 0,
            noprnt: 0,
            lsun: "T".to_string(),
            isun: 10,
            lsunfl: "F".to_string(),
            lbmnam: "F".to_string(),
            lfltnm: "F".to_string(),
            h2oaer: "T".to_string(),
            // 'F' trips a read error in the simulator; blank means default.
            ldatdr: String::new(),
            solcon: 0,
            aplus: String::new(),
            aruss: String::new(),
            icld: 0,
            range: 0.0,
            beta: 0.0,
            ro: String::new(),
            lenn: 1,
            phi: 0.0,
            iparm: 12,
            parm3: 0.0,
            parm4: 0.0,
            time: 0.0,
            psipo: 0.0,
            yflag: "R".to_string(),
            xflag: "M".to_string(),
            dlimit: String::new(),
            flags: "MRAA   ".to_string(),
            mlflx: 0,
            irpt: 0,
            nsurf: 1,
            aatemp: 294.0,
            sunfl2: String::new(),
            bmname: String::new(),
            filtnm: String::new(),
            datdir: String::new(),
            salbfl: String::new(),
            csalb: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SurfaceReflectance, Tape5Config};

    #[test]
    fn default_config_matches_wrapper_defaults() {
        let config = Tape5Config::default();

        assert_eq!(config.modtrn, "M");
        assert_eq!(config.model, 2);
        assert_eq!(config.surref, SurfaceReflectance::Albedo(0.75));
        assert_eq!(config.fixed.iemsct, 2);
        assert_eq!(config.fixed.flags, "MRAA   ");
    }

    #[test]
    fn surface_reflectance_deserializes_from_number_or_mode() {
        let albedo: SurfaceReflectance = serde_json::from_str("0.3").unwrap();
        let brdf: SurfaceReflectance = serde_json::from_str("\"BRDF\"").unwrap();
        let lambertian: SurfaceReflectance = serde_json::from_str("\"LAMBER\"").unwrap();

        assert_eq!(albedo, SurfaceReflectance::Albedo(0.3));
        assert_eq!(brdf, SurfaceReflectance::Brdf);
        assert_eq!(lambertian, SurfaceReflectance::Lambertian);
        assert!(serde_json::from_str::<SurfaceReflectance>("\"MIRROR\"").is_err());
    }

    #[test]
    fn config_deserializes_with_partial_overrides() {
        let config: Tape5Config = serde_json::from_str(
            r#"{"model": 3, "vis": 23.0, "fixed": {"iemsct": 1}}"#,
        )
        .unwrap();

        assert_eq!(config.model, 3);
        assert_eq!(config.vis, 23.0);
        assert_eq!(config.fixed.iemsct, 1);
        assert_eq!(config.fixed.iparm, 12);
        assert_eq!(config.h1, 100.0);
    }
}
