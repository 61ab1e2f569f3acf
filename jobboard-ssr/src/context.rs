//! Country and sector context paragraphs for detail pages.
//!
//! The tables are plain `const` data. [`ContextTables::new`] scans every value
//! before the tables can be used and refuses to construct if any of them
//! carries heading or paragraph markup or template interpolation syntax.

use jobboard_core::ContentError;

/// Key of the fallback entry every table must carry.
pub const DEFAULT_KEY: &str = "default";

/// Tokens that must never appear in table values (compared lowercase).
const FORBIDDEN_TOKENS: &[&str] = &[
    "<h1", "<h2", "<h3", "<h4", "<h5", "<h6", "</h", "<p>", "<p ", "</p", "<li", "</li", "${",
    "{{", "}}", "<%", "%>",
];

pub type ContextTable = &'static [(&'static str, &'static str)];

pub const COUNTRY_CONTEXT: ContextTable = &[
    (
        "kenya",
        "Kenya hosts one of the largest refugee populations in Africa, concentrated in the Dadaab and Kakuma camps and in urban Nairobi. Humanitarian and development agencies work alongside county governments on drought response, health systems, education and livelihoods, and Nairobi serves as a regional hub for many international organizations covering East Africa and the Horn.",
    ),
    (
        "uganda",
        "Uganda runs a progressive refugee policy that grants freedom of movement and access to land, and it hosts well over a million refugees, mainly from South Sudan and the Democratic Republic of the Congo. Programmes focus on settlement services, health, education, protection and self-reliance, with field offices spread across the West Nile and south-western regions.",
    ),
    (
        "ethiopia",
        "Ethiopia combines large-scale internal displacement, recurrent drought and one of the biggest refugee caseloads on the continent. Agencies operate from Addis Ababa and regional hubs to deliver food assistance, nutrition, health, water and protection services, often in partnership with federal and regional authorities and local civil society organizations.",
    ),
    (
        "somalia",
        "Somalia faces protracted displacement, cyclical drought and flooding, and a complex security environment. Many organizations manage programmes from Nairobi or Mogadishu with strong national teams in the field. Work spans food security, nutrition, water and sanitation, health, education and durable solutions for displaced families.",
    ),
    (
        "south sudan",
        "South Sudan remains one of the most challenging operating environments in the world, with widespread food insecurity, seasonal flooding and limited infrastructure. Staff often rotate between Juba and remote field bases reached by air, and programmes cover emergency health, nutrition, logistics, protection and support to returnees.",
    ),
    (
        "sudan",
        "Sudan is experiencing one of the largest displacement crises globally. Humanitarian teams work across multiple states and neighbouring countries to provide emergency health care, food, shelter, water and protection, and they negotiate access in a fast-changing context that demands flexibility and strong coordination skills.",
    ),
    (
        "nigeria",
        "In north-east Nigeria, years of conflict have displaced millions of people and disrupted farming, markets and basic services. Organizations based in Maiduguri and Abuja run integrated programmes in health, nutrition, food security, water and sanitation, education and protection, with growing attention to early recovery and resilience.",
    ),
    (
        "democratic republic of the congo",
        "The Democratic Republic of the Congo has long-running crises in its eastern provinces, along with recurrent disease outbreaks. Teams in Goma, Bukavu, Kinshasa and smaller field offices work on emergency response, health, nutrition, protection, education and logistics across vast distances and difficult terrain.",
    ),
    (
        "afghanistan",
        "Afghanistan has very high humanitarian needs driven by economic collapse, drought, natural hazards and returns from neighbouring countries. Organizations operate from Kabul and provincial offices, delivering health, nutrition, food security, shelter and livelihood programmes while adapting to operating constraints and the need for principled access.",
    ),
    (
        "yemen",
        "Yemen has endured years of conflict that damaged health, water and economic systems and left most of the population reliant on assistance. Programmes run from Sana'a, Aden and hub offices, focusing on health, cholera prevention, nutrition, food assistance, water and sanitation, and cash transfers.",
    ),
    (
        "syria",
        "Syria remains a complex emergency in which millions of people depend on assistance inside the country, delivered from Damascus and from cross-border hubs. Work includes health, shelter, water and sanitation, protection, education and early recovery, often in close cooperation with local partners.",
    ),
    (
        "ukraine",
        "In Ukraine, humanitarian organizations support people affected by the war through cash assistance, shelter repair, health, mental health and psychosocial support, protection and winterization. Teams operate from Kyiv, Dnipro, Kharkiv, Odesa and other hubs, working closely with local organizations and volunteer networks.",
    ),
    (
        DEFAULT_KEY,
        "Humanitarian and development organizations work in many countries to respond to conflict, displacement, disease and natural hazards, and to help communities recover and build resilience. Roles range from headquarters and regional positions to field postings, and they often involve close collaboration with national staff, local partners and government counterparts.",
    ),
];

pub const SECTOR_CONTEXT: ContextTable = &[
    (
        "health",
        "Health programmes provide primary care, maternal and child health services, disease surveillance and outbreak response, often through mobile clinics and support to existing facilities. Professionals in this sector work with ministries of health and health cluster partners to keep essential services running when systems are under strain.",
    ),
    (
        "education",
        "Education in emergencies keeps children learning during crises through temporary learning spaces, teacher training, learning materials and support for psychosocial wellbeing. Staff in this sector coordinate with education authorities and communities so that schooling remains safe, inclusive and recognized.",
    ),
    (
        "protection",
        "Protection work aims to keep people safe from violence, coercion and abuse, with specialist services for children, survivors of gender-based violence and people with specific needs. Teams carry out monitoring, case management, legal assistance and community-based protection activities.",
    ),
    (
        "logistics",
        "Logistics teams make every other programme possible by managing procurement, warehousing, fleet, transport and supply chains, frequently in places with damaged roads and limited markets. The work rewards careful planning, strong compliance and the ability to solve practical problems under pressure.",
    ),
    (
        "nutrition",
        "Nutrition programmes prevent and treat acute malnutrition through screening, outpatient and inpatient treatment, infant and young child feeding support and micronutrient interventions. Nutrition professionals work closely with health, food security and water teams to address the underlying causes of malnutrition.",
    ),
    (
        "water sanitation hygiene",
        "Water, sanitation and hygiene programmes provide safe drinking water, latrines, handwashing facilities and hygiene promotion, which are essential to prevent disease outbreaks in camps and crowded settlements. Engineers and hygiene promoters in this sector combine technical expertise with community engagement.",
    ),
    (
        "food security",
        "Food security and livelihoods programmes help households meet their basic needs through food or cash assistance, and they rebuild incomes through agriculture, livestock and market support. Practitioners analyse markets and vulnerability to design assistance that protects both lives and livelihoods.",
    ),
    (
        "coordination",
        "Coordination roles bring together agencies, authorities and local organizations to avoid gaps and duplication, share information and plan a coherent response. Coordinators manage meetings, data and strategic planning processes, and they represent collective priorities to donors and decision makers.",
    ),
    (
        DEFAULT_KEY,
        "Whatever the sector, humanitarian roles demand adaptability, teamwork and commitment to the principles of humanity, neutrality, impartiality and independence. Staff are expected to put the needs and dignity of affected people at the centre of their work and to learn continuously from the communities they serve.",
    ),
];

/// Validated lookup over the country and sector tables.
#[derive(Debug, Clone, Copy)]
pub struct ContextTables {
    countries: ContextTable,
    sectors: ContextTable,
}

impl ContextTables {
    /// The built-in tables, validated.
    pub fn new() -> Result<Self, ContentError> {
        Self::from_tables(COUNTRY_CONTEXT, SECTOR_CONTEXT)
    }

    /// Arbitrary tables, validated.
    pub fn from_tables(countries: ContextTable, sectors: ContextTable) -> Result<Self, ContentError> {
        validate_table("country", countries)?;
        validate_table("sector", sectors)?;
        Ok(Self { countries, sectors })
    }

    /// Context paragraph for a country, falling back to the default entry.
    pub fn country(&self, name: &str) -> &'static str {
        lookup(self.countries, name)
    }

    /// Context paragraph for a sector, falling back to the default entry.
    pub fn sector(&self, name: &str) -> &'static str {
        lookup(self.sectors, name)
    }

    /// Whether a country has its own entry.
    pub fn knows_country(&self, name: &str) -> bool {
        find(self.countries, name).is_some()
    }
}

fn validate_table(table: &str, entries: ContextTable) -> Result<(), ContentError> {
    for (key, value) in entries {
        let lower = value.to_lowercase();
        if let Some(token) = FORBIDDEN_TOKENS.iter().find(|t| lower.contains(*t)) {
            return Err(ContentError::ContextTableInjection {
                table: table.to_string(),
                key: key.to_string(),
                token: token.to_string(),
            });
        }
    }
    Ok(())
}

fn find(table: ContextTable, name: &str) -> Option<&'static str> {
    let wanted = name.trim().to_lowercase();
    table
        .iter()
        .find(|(key, _)| *key != DEFAULT_KEY && *key == wanted)
        .map(|(_, value)| *value)
}

fn lookup(table: ContextTable, name: &str) -> &'static str {
    find(table, name)
        .or_else(|| {
            table
                .iter()
                .find(|(key, _)| *key == DEFAULT_KEY)
                .map(|(_, value)| *value)
        })
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_clean() {
        assert!(ContextTables::new().is_ok());
    }

    #[test]
    fn test_lookup_is_case_insensitive() -> Result<(), ContentError> {
        let tables = ContextTables::new()?;
        assert!(tables.country("  KENYA ").starts_with("Kenya hosts"));
        assert!(tables.sector("Health").starts_with("Health programmes"));
        assert!(tables.knows_country("South Sudan"));
        Ok(())
    }

    #[test]
    fn test_unknown_key_falls_back_to_default() -> Result<(), ContentError> {
        let tables = ContextTables::new()?;
        assert!(!tables.knows_country("Atlantis"));
        assert!(tables.country("Atlantis").starts_with("Humanitarian and development"));
        assert!(tables.sector("").starts_with("Whatever the sector"));
        Ok(())
    }

    #[test]
    fn test_heading_markup_rejected() {
        const BAD: ContextTable = &[("kenya", "Intro <H2>Injected</H2>"), (DEFAULT_KEY, "ok")];
        let err = ContextTables::from_tables(BAD, SECTOR_CONTEXT);
        assert_eq!(
            err.err(),
            Some(ContentError::ContextTableInjection {
                table: "country".to_string(),
                key: "kenya".to_string(),
                token: "<h2".to_string(),
            })
        );
    }

    #[test]
    fn test_interpolation_rejected() {
        const BAD: ContextTable = &[("health", "Serving ${region} today"), (DEFAULT_KEY, "ok")];
        assert!(matches!(
            ContextTables::from_tables(COUNTRY_CONTEXT, BAD),
            Err(ContentError::ContextTableInjection { token, .. }) if token == "${"
        ));

        const MUSTACHE: ContextTable = &[(DEFAULT_KEY, "Hello {{ name }}")];
        assert!(ContextTables::from_tables(MUSTACHE, SECTOR_CONTEXT).is_err());
    }
}
