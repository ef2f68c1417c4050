//! School to conference lookup data

use crate::domain::{Conference, Sport};

/// Default conference of every school, keyed by the site's team name
pub fn base_conferences() -> &'static [(&'static str, Conference)] {
    use Conference::{Aus, Cw, Oua, Rseq};

    &[
        ("Acadia", Aus),
        ("Alberta", Cw),
        ("Algoma", Oua),
        ("Bishop's", Rseq),
        ("Brandon", Cw),
        ("Brock", Oua),
        ("Calgary", Cw),
        ("Cape Breton", Aus),
        ("Carleton", Oua),
        ("Concordia", Rseq),
        ("Dalhousie", Aus),
        ("Guelph", Oua),
        ("Lakehead", Oua),
        ("Laurentian", Oua),
        ("Laurier", Oua),
        ("Laval", Rseq),
        ("Lethbridge", Cw),
        ("MacEwan", Cw),
        ("Manitoba", Cw),
        ("McGill", Rseq),
        ("McMaster", Oua),
        ("Memorial", Aus),
        ("Moncton", Aus),
        ("Montreal", Rseq),
        ("Mount Allison", Aus),
        ("Mount Royal", Cw),
        ("Nipissing", Oua),
        ("Ontario Tech", Oua),
        ("Ottawa", Oua),
        ("Queen's", Oua),
        ("Regina", Cw),
        ("RMC", Oua),
        ("Saint Mary's", Aus),
        ("Saskatchewan", Cw),
        ("Sherbrooke", Rseq),
        ("StFX", Aus),
        ("Thompson Rivers", Cw),
        ("Toronto", Oua),
        ("Toronto Metropolitan", Oua),
        ("Trent", Oua),
        ("Trinity Western", Cw),
        ("UBC", Cw),
        ("UBC Okanagan", Cw),
        ("UFV", Cw),
        ("UNB", Aus),
        ("UNBC", Cw),
        ("UPEI", Aus),
        ("UQAM", Rseq),
        ("UQTR", Rseq),
        ("Victoria", Cw),
        ("Waterloo", Oua),
        ("Western", Oua),
        ("Windsor", Oua),
        ("Winnipeg", Cw),
        ("York", Oua),
    ]
}

/// Schools that play a sport outside their default conference
pub fn conference_overrides(sport: Sport) -> &'static [(&'static str, Conference)] {
    match sport {
        // Quebec hockey programs play in the OUA
        Sport::IceHockey => &[
            ("McGill", Conference::Oua),
            ("UQTR", Conference::Oua),
            ("Concordia", Conference::Oua),
        ],
        Sport::Basketball | Sport::Football | Sport::Soccer | Sport::Volleyball => &[],
    }
}
