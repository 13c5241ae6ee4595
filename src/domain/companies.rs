use crate::domain::model::Company;
use std::collections::BTreeMap;

/// Customer list shown on the portal map.
pub const DEFAULT_COMPANIES: &[&str] = &[
    "ABS Jets, a.s.",
    "agriKomp Bohemia s.r.o.",
    "ATALIAN CZ s.r.o.",
    "ATALIAN SK s. r. o.",
    "Aviation composite solution s.r.o.",
    "BBH Tsuchiya s.r.o.",
    "BeF Home, s.r.o.",
    "Chládek zahradnické centrum s.r.o.",
    "ČKD Blansko Holding, a.s.",
    "CONSULTEST s.r.o.",
    "CONTEG, spol. s r.o.",
    "CZ-AEROMOTIVE a.s.",
    "CZ-SKD Solutions a.s.",
    "Dopravní podnik města České Budějovice, a.s.",
    "EGE Power System, s.r.o.",
    "EGE, spol. s r.o.",
    "EVEKTOR, spol. s r.o.",
    "Falcon security, s.r.o.",
    "Geomine a.s.",
    "HGS, a.s.",
    "ITMAN Czech, s.r.o.",
    "KAMÍR a Co spol. s r. o.",
    "KARAT Software a.s.",
    "KRAB BRNO, s.r.o.",
    "Lašek Transport s.r.o.",
    "LINEA NIVNICE, a.s.",
    "Mark2 Corporation Czech a.s.",
    "MEDICA FILTER spol. s r.o.",
    "MODELÁRNA LIAZ spol. s r. o.",
    "NN STEEL s.r.o.",
    "NPK Europe Mfg. s.r.o.",
    "NYTRON s.r.o.",
    "PAPOS Trade s.r.o.",
    "PCV Computers, s. r. o.",
    "POLAK CZ s.r.o.",
    "PRODOMOS s.r.o.",
    "SAGITTA Ltd., spol. s r.o.",
    "SENSIT s.r.o.",
    "SIGNUM spol. s r.o.",
    "SILROC CZ,a.s.",
    "SINOP SMP s.r.o.",
    "TVD-Technická výroba, a.s.",
    "ZAMET, spol. s r.o.",
];

/// Known logo URLs for companies the public services do not find.
pub const DEFAULT_LOGO_OVERRIDES: &[(&str, &str)] = &[
    (
        "ČKD Blansko Holding, a.s.",
        "https://www.ckdblansko.cz/wp-content/uploads/2021/03/CKD-Blansko-logo.png",
    ),
    (
        "Dopravní podnik města České Budějovice, a.s.",
        "https://www.dpb.cz/images/logo-dpb.png",
    ),
    (
        "EVEKTOR, spol. s r.o.",
        "https://www.evektor.cz/images/evektor-logo.png",
    ),
    (
        "KARAT Software a.s.",
        "https://www.karat.cz/wp-content/uploads/2020/09/karat-logo.png",
    ),
    (
        "LINEA NIVNICE, a.s.",
        "https://www.linea-nivnice.cz/images/logo.png",
    ),
];

pub fn default_companies() -> Vec<Company> {
    DEFAULT_COMPANIES.iter().map(|name| Company::new(*name)).collect()
}

pub fn default_overrides() -> BTreeMap<String, String> {
    DEFAULT_LOGO_OVERRIDES
        .iter()
        .map(|(name, url)| (name.to_string(), url.to_string()))
        .collect()
}
