//! Declarative card schema for the control file.
//!
//! One function per card, each returning the ordered field list with the
//! exact widths, decimal counts, and validators of the simulator's fixed
//! column layout. `assemble` strings the cards together in emission order
//! and applies the conditional-card rules.

use crate::domain::{FixedSettings, ModtranError, ModtranResult, SurfaceReflectance, Tape5Config};
use crate::format::{FieldSpec, Validator};

const TF: Validator = Validator::TextOneOf(&["T", "F"]);

pub(super) struct Card {
    pub(super) name: &'static str,
    pub(super) fields: Vec<FieldSpec>,
}

impl Card {
    fn new(name: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self { name, fields }
    }
}

/// Builds every applicable card in the fixed emission order. `h2` is the
/// already-clamped target altitude.
pub(super) fn assemble(config: &Tape5Config, h2: f64) -> ModtranResult<Vec<Card>> {
    let fixed = &config.fixed;
    let mut cards = vec![card1(config), card1a(config)];
    if fixed.lsunfl == "T" {
        cards.push(Card::new(
            "CARD1A1",
            vec![required_file("SUNFL2", &fixed.sunfl2, "LSUNFL")?],
        ));
    }
    if fixed.lbmnam == "T" {
        cards.push(Card::new(
            "CARD1A2",
            vec![required_file("BMNAME", &fixed.bmname, "LBMNAM")?],
        ));
    }
    if fixed.lfltnm == "T" {
        cards.push(Card::new(
            "CARD1A3",
            vec![required_file("FILTNM", &fixed.filtnm, "LFLTNM")?],
        ));
    }
    if fixed.ldatdr == "T" {
        cards.push(Card::new(
            "CARD1A4",
            vec![required_file("DATDIR", &fixed.datdir, "LDATDR")?],
        ));
    }
    cards.push(card2(config));
    cards.push(card3(config, h2));
    // Solar/lunar scattering geometry only exists in radiance mode 2.
    if fixed.iemsct == 2 {
        cards.push(card3a1(config));
        cards.push(card3a2(config));
    }
    cards.push(card4(config));
    if config.surref.needs_surface_cards() {
        cards.push(card4a(fixed));
        cards.push(Card::new(
            "CARD4L1",
            vec![required_file("SALBFL", &fixed.salbfl, "SURREF")?],
        ));
        cards.push(Card::new(
            "CARD4L2",
            vec![required_file("CSALB", &fixed.csalb, "SURREF")?],
        ));
    }
    cards.push(Card::new(
        "CARD5",
        vec![
            FieldSpec::int("IRPT", fixed.irpt, 5)
                .with_validator(Validator::IntOneOf(&[0, 1, -1, 3, -3, 4, -4])),
        ],
    ));
    Ok(cards)
}

fn card1(config: &Tape5Config) -> Card {
    let fixed = &config.fixed;
    let mut fields = vec![
        FieldSpec::text("MODTRN", &config.modtrn, 1)
            .with_validator(Validator::TextOneOf(&["T", "M", "C", "K"])),
        FieldSpec::text("SPEED", &config.speed, 1)
            .with_validator(Validator::TextOneOf(&["S", "M"])),
        FieldSpec::int("MODEL", config.model, 3).with_validator(Validator::IntRange(1, 6)),
        FieldSpec::int("ITYPE", fixed.itype, 5).with_validator(Validator::IntOneOf(&[1, 2, 3])),
        FieldSpec::int("IEMSCT", fixed.iemsct, 5).with_validator(Validator::IntRange(0, 3)),
        FieldSpec::int("IMULT", fixed.imult, 5)
            .with_validator(Validator::IntOneOf(&[0, 1, -1])),
    ];
    const M_NAMES: [&str; 6] = ["M1", "M2", "M3", "M4", "M5", "M6"];
    for (name, value) in M_NAMES.into_iter().zip(fixed.m) {
        fields.push(FieldSpec::int(name, value, 5).with_validator(Validator::IntRange(0, 6)));
    }
    fields.extend([
        FieldSpec::int("MDEF", fixed.mdef, 5).with_validator(Validator::IntOneOf(&[1, 2])),
        FieldSpec::int("IM", fixed.im, 5).with_validator(Validator::IntOneOf(&[0, 1])),
        FieldSpec::int("NOPRNT", fixed.noprnt, 5)
            .with_validator(Validator::IntOneOf(&[0, 1, -1, -2])),
        FieldSpec::real("TPTEMP", config.tptemp, 8, 3),
        FieldSpec::spacer(1),
        surref_field(&config.surref),
    ]);
    Card::new("CARD1", fields)
}

fn surref_field(surref: &SurfaceReflectance) -> FieldSpec {
    match surref {
        SurfaceReflectance::Albedo(value) => FieldSpec::real("SURREF", *value, 6, 4)
            .with_validator(Validator::RealRange(0.0, 1.0)),
        SurfaceReflectance::Brdf => FieldSpec::text("SURREF", "BRDF", 6),
        SurfaceReflectance::Lambertian => FieldSpec::text("SURREF", "LAMBER", 6),
    }
}

fn card1a(config: &Tape5Config) -> Card {
    let fixed = &config.fixed;
    Card::new(
        "CARD1A",
        vec![
            FieldSpec::text("DIS", &config.dis, 1)
                .with_validator(Validator::TextOneOf(&["T", "F", "S"])),
            FieldSpec::text("DISAZM", &config.disazm, 1).with_validator(TF),
            FieldSpec::int("NSTR", config.nstr, 3)
                .with_validator(Validator::IntOneOf(&[2, 4, 8, 16])),
            FieldSpec::text("LSUN", &fixed.lsun, 1).with_validator(TF),
            FieldSpec::int("ISUN", fixed.isun, 4).with_validator(Validator::IntOneOf(&[10])),
            FieldSpec::real("CO2MX", config.co2mx, 10, 5),
            // Free-form scaled-column strings; only the slot width is
            // enforced (known validation gap in the source schema).
            FieldSpec::text("H2OSTR", &config.h2ostr, 10),
            FieldSpec::text("O3STR", &config.o3str, 10),
            FieldSpec::text("LSUNFL", &fixed.lsunfl, 2)
                .with_validator(Validator::TextOneOf(&["T", "F", "1", "2", "3", "4"])),
            FieldSpec::text("LBMNAM", &fixed.lbmnam, 2).with_validator(TF),
            FieldSpec::text("LFLTNM", &fixed.lfltnm, 2).with_validator(TF),
            FieldSpec::text("H2OAER", &fixed.h2oaer, 2).with_validator(TF),
            FieldSpec::spacer(2),
            // 'F' trips a read error in the simulator, so only 'T' and
            // blank are accepted.
            FieldSpec::text("LDATDR", &fixed.ldatdr, 5)
                .with_validator(Validator::TextOneOf(&["T", ""])),
            FieldSpec::int("SOLCON", fixed.solcon, 5),
        ],
    )
}

fn card2(config: &Tape5Config) -> Card {
    Card::new(
        "CARD2",
        vec![
            FieldSpec::text("APLUS", &config.fixed.aplus, 2)
                .with_validator(Validator::TextOneOf(&["", " ", "A+"])),
            FieldSpec::int("IHAZE", config.ihaze, 3)
                .with_validator(Validator::IntOneOf(&[-1, 0, 1, 2, 3, 4, 5, 6, 8, 9, 10])),
            FieldSpec::text("CNOVAM", &config.cnovam, 1)
                .with_validator(Validator::TextOneOf(&["", "N"])),
            FieldSpec::int("ISEASN", config.iseasn, 4)
                .with_validator(Validator::IntRange(0, 2)),
            FieldSpec::text("ARUSS", &config.fixed.aruss, 3)
                .with_validator(Validator::TextOneOf(&["", "USS"])),
            FieldSpec::int("IVULCN", config.ivulcn, 2).with_validator(Validator::IntRange(0, 8)),
            FieldSpec::int("ICSTL", config.icstl, 5).with_validator(Validator::IntRange(1, 10)),
            // Cloud models need card 2A, which is not supported; only the
            // no-cloud setting passes.
            FieldSpec::int("ICLD", config.fixed.icld, 5)
                .with_validator(Validator::IntOneOf(&[0])),
            FieldSpec::int("IVSA", config.ivsa, 5).with_validator(Validator::IntOneOf(&[0, 1])),
            FieldSpec::real("VIS", config.vis, 10, 5),
            FieldSpec::real("WSS", config.wss, 10, 5),
            FieldSpec::real("WHH", config.whh, 10, 5),
            FieldSpec::real("RAINRT", config.rainrt, 10, 5),
            FieldSpec::real("GNDALT", config.gndalt, 10, 5),
        ],
    )
}

fn card3(config: &Tape5Config, h2: f64) -> Card {
    let fixed = &config.fixed;
    Card::new(
        "CARD3",
        vec![
            FieldSpec::real("H1", config.h1, 10, 5),
            FieldSpec::real("H2", h2, 10, 5),
            FieldSpec::real("ANGLE", config.angle, 10, 5)
                .with_validator(Validator::RealRange(0.0, 180.0)),
            FieldSpec::real("RANGE", fixed.range, 10, 5),
            FieldSpec::real("BETA", fixed.beta, 10, 5)
                .with_validator(Validator::RealRange(0.0, 180.0)),
            FieldSpec::text("RO", &fixed.ro, 10),
            FieldSpec::int("LENN", fixed.lenn, 5).with_validator(Validator::IntOneOf(&[0, 1])),
            FieldSpec::spacer(5),
            FieldSpec::real("PHI", fixed.phi, 10, 5)
                .with_validator(Validator::RealRange(0.0, 180.0)),
        ],
    )
}

fn card3a1(config: &Tape5Config) -> Card {
    Card::new(
        "CARD3A1",
        vec![
            FieldSpec::int("IPARM", config.fixed.iparm, 5)
                .with_validator(Validator::IntOneOf(&[12])),
            FieldSpec::int("IPH", config.iph, 5).with_validator(Validator::IntOneOf(&[0, 2])),
            FieldSpec::int("IDAY", config.iday, 5).with_validator(Validator::IntRange(1, 365)),
            FieldSpec::int("ISOURC", config.isourc, 5)
                .with_validator(Validator::IntOneOf(&[0, 1])),
        ],
    )
}

fn card3a2(config: &Tape5Config) -> Card {
    let fixed = &config.fixed;
    Card::new(
        "CARD3A2",
        vec![
            FieldSpec::real("PARM1", config.parm1, 10, 3)
                .with_validator(Validator::RealRange(0.0, 360.0)),
            FieldSpec::real("PARM2", config.parm2, 10, 3)
                .with_validator(Validator::RealRange(0.0, 180.0)),
            FieldSpec::real("PARM3", fixed.parm3, 10, 3),
            FieldSpec::real("PARM4", fixed.parm4, 10, 3),
            FieldSpec::real("TIME", fixed.time, 10, 3),
            FieldSpec::real("PSIPO", fixed.psipo, 10, 3),
            FieldSpec::real("ANGLEM", config.anglem, 10, 3)
                .with_validator(Validator::RealRange(0.0, 180.0)),
            FieldSpec::real("G", config.g, 10, 3)
                .with_validator(Validator::RealRange(0.0, 1.0)),
        ],
    )
}

fn card4(config: &Tape5Config) -> Card {
    let fixed = &config.fixed;
    // The manual recommends DV = FWHM / 2; DV is the user knob.
    let fwhm = 2.0 * config.dv;
    Card::new(
        "CARD4",
        vec![
            FieldSpec::real("V1", config.v1, 10, 3),
            FieldSpec::real("V2", config.v2, 10, 3),
            FieldSpec::real("DV", config.dv, 10, 3),
            FieldSpec::real("FWHM", fwhm, 10, 3),
            FieldSpec::text("YFLAG", &fixed.yflag, 1)
                .with_validator(Validator::TextOneOf(&["T", "R"])),
            FieldSpec::text("XFLAG", &fixed.xflag, 1)
                .with_validator(Validator::TextOneOf(&["W", "M", "N"])),
            FieldSpec::text("DLIMIT", &fixed.dlimit, 8),
            FieldSpec::text("FLAGS", &fixed.flags, 7),
            FieldSpec::int("MLFLX", fixed.mlflx, 3),
        ],
    )
}

fn card4a(fixed: &FixedSettings) -> Card {
    Card::new(
        "CARD4A",
        vec![
            FieldSpec::int("NSURF", fixed.nsurf, 1)
                .with_validator(Validator::IntOneOf(&[1, 2])),
            FieldSpec::real("AATEMP", fixed.aatemp, 8, 3),
        ],
    )
}

fn required_file(
    name: &'static str,
    value: &str,
    flag: &'static str,
) -> ModtranResult<FieldSpec> {
    if value.is_empty() {
        return Err(ModtranError::invalid_value(
            name,
            "",
            format!("a non-empty file name while {flag} requests one"),
        ));
    }
    Ok(FieldSpec::filename(name, value, 80))
}
