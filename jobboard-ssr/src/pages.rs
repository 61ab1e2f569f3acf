//! Page builders for the three document kinds, plus padding content.

use jobboard_core::{BoardStats, Job, JobFilters, JobRecord, Timestamp};

use crate::document::{Block, Document, Head, Inline, Section, Subsection};
use crate::jsonld;
use crate::seo::{PageKind, SeoContext, SeoMeta};
use crate::synthesizer::Synthesizer;

impl Synthesizer {
    pub(crate) fn homepage_document(&self, stats: &BoardStats, recent: &[JobRecord]) -> Document {
        let site = &self.config.site_name;
        let mut ctx = SeoContext::new(PageKind::Home);
        ctx.job_count = stats.total_jobs;
        ctx.organization_count = stats.organizations;
        let meta = self.seo.generate(&ctx);

        let head = self.head(
            &meta,
            "/",
            "website",
            vec![
                jsonld::website(&self.config),
                jsonld::item_list(&self.config, recent),
            ],
        );

        let glance = Section::new("The Job Board at a Glance")
            .paragraph(format!(
                "{site} collects vacancies from humanitarian, development and non-profit organizations in one place, so you can compare opportunities without visiting dozens of career pages."
            ))
            .subsection(Subsection::new("Open Positions").paragraph(format!(
                "There {} currently {} open {} listed on {site}, covering field, regional and headquarters roles.",
                if stats.total_jobs == 1 { "is" } else { "are" },
                stats.total_jobs,
                plural(stats.total_jobs, "position", "positions"),
            )))
            .subsection(Subsection::new("Hiring Organizations").paragraph(format!(
                "{} {} currently recruiting, from international NGOs and United Nations agencies to national civil society groups.",
                stats.organizations,
                plural(stats.organizations, "organization is", "organizations are"),
            )))
            .subsection(Subsection::new("Posted Today").paragraph(format!(
                "{} new {} added today. Listings are refreshed several times a day.",
                stats.new_today,
                plural(stats.new_today, "vacancy was", "vacancies were"),
            )));

        let latest = if recent.is_empty() {
            Section::new("Latest Openings").paragraph(
                "No openings are listed right now. New vacancies are added throughout the day, so please check back soon.",
            )
        } else {
            Section::new("Latest Openings")
                .paragraph("The most recently posted vacancies, newest first.")
                .block(Block::List(recent.iter().map(listing_item).collect()))
        };

        let mut countries: Vec<&str> = Vec::new();
        for job in recent {
            let country = job.country.trim();
            if !country.is_empty() && !countries.iter().any(|c| c.eq_ignore_ascii_case(country)) {
                countries.push(country);
            }
        }
        let browse = if countries.is_empty() {
            Section::new("Browse by Country")
                .paragraph("Use the job search to filter vacancies by country, sector or keyword.")
        } else {
            Section::new("Browse by Country")
                .paragraph("Jump straight to current vacancies in these countries:")
                .block(Block::List(
                    countries
                        .iter()
                        .map(|country| {
                            vec![Inline::link(
                                format!("/jobs?country={}", encode_query_value(country)),
                                format!("Jobs in {country}"),
                            )]
                        })
                        .collect(),
                ))
        };

        Document::new(head, "Humanitarian Jobs and NGO Careers")
            .intro(Block::text(format!(
                "{site} brings together {} open positions from {} organizations working in humanitarian response and international development, with {} new {} today.",
                stats.total_jobs,
                stats.organizations,
                stats.new_today,
                plural(stats.new_today, "listing", "listings"),
            )))
            .section(glance)
            .section(latest)
            .section(browse)
    }

    pub(crate) fn listing_document(
        &self,
        items: &[JobRecord],
        total: usize,
        filters: &JobFilters,
    ) -> Document {
        let countries = display_list(&filters.country);
        let sectors = display_list(&filters.sector);
        let search = filters.search_term();

        let mut ctx = SeoContext::new(PageKind::Listing);
        ctx.country = countries.clone();
        ctx.sector = sectors.clone();
        ctx.title = search.map(str::to_string).unwrap_or_default();
        ctx.job_count = total;
        let meta = self.seo.generate(&ctx);

        let head = self.head(
            &meta,
            &listing_path(filters),
            "website",
            vec![
                jsonld::website(&self.config),
                jsonld::item_list(&self.config, items),
            ],
        );

        let title = match (sectors.is_empty(), countries.is_empty(), search) {
            (false, false, _) => format!("{sectors} Jobs in {countries}"),
            (false, true, _) => format!("{sectors} Jobs"),
            (true, false, _) => format!("Humanitarian Jobs in {countries}"),
            (true, true, Some(term)) => format!("Jobs Matching \"{term}\""),
            (true, true, None) => "All Humanitarian Jobs".to_string(),
        };

        let intro = if total == 0 {
            "No open positions currently match this search. Try removing a filter or searching for a broader term.".to_string()
        } else {
            format!(
                "{total} open {} this search. Showing {}, newest first.",
                plural(total, "position matches", "positions match"),
                items.len(),
            )
        };

        let mut openings = Section::new("Current Openings");
        if items.is_empty() {
            openings = openings.subsection(Subsection::new("No Matching Openings").paragraph(
                "There are no vacancies for this combination of filters at the moment. Vacancies open and close every day, so this page may look different tomorrow.",
            ));
        } else {
            for job in items {
                openings = openings.subsection(
                    Subsection::new(job.title.clone())
                        .block(Block::Paragraph(record_summary(job)))
                        .block(Block::Paragraph(vec![Inline::link(
                            format!("/jobs/{}", job.id),
                            "View the full vacancy",
                        )])),
                );
            }
        }

        let mut doc = Document::new(head, title)
            .intro(Block::text(intro))
            .section(openings);

        let mut contextual = false;
        if let [country] = filters.country.as_slice() {
            doc.push_section(
                Section::new(format!("Working in {}", country.trim()))
                    .paragraph(self.context.country(country)),
            );
            contextual = true;
        }
        if let [sector] = filters.sector.as_slice() {
            doc.push_section(
                Section::new(format!("About {} Jobs", sector.trim()))
                    .paragraph(self.context.sector(sector)),
            );
            contextual = true;
        }
        if !contextual {
            doc.push_section(Section::new("Refine Your Search").paragraph(
                "Narrow the list by country or sector, or search for a job title, organization or location. Filters can be combined, and every result links to the full vacancy announcement.",
            ));
        }
        doc
    }

    pub(crate) fn detail_document(&self, job: &Job) -> Document {
        let site = &self.config.site_name;
        let title = non_blank(&job.title).unwrap_or("Untitled Position");
        let organization = non_blank(&job.organization).unwrap_or("The hiring organization");
        let description = job.description.as_deref().and_then(non_blank);

        let mut ctx = SeoContext::new(PageKind::Detail);
        ctx.title = title.to_string();
        ctx.description = description.unwrap_or_default().to_string();
        ctx.organization = job.organization.trim().to_string();
        ctx.location = job.location.trim().to_string();
        ctx.country = job.country.trim().to_string();
        ctx.sector = job.sector.trim().to_string();
        let meta = self.seo.generate(&ctx);

        let posting_description = description.unwrap_or(&meta.description);
        let head = self.head(
            &meta,
            &format!("/jobs/{}", job.id),
            "article",
            vec![jsonld::job_posting(&self.config, job, posting_description)],
        );

        let place = join_nonempty(&[&job.location, &job.country], ", ");
        let mut intro = format!("{organization} is recruiting for the position of {title}");
        if !place.is_empty() {
            intro.push_str(&format!(", based in {place}"));
        }
        intro.push_str(&format!(". The vacancy was posted on {}", format_date(job.date_posted)));
        match job.deadline {
            Some(deadline) => {
                intro.push_str(&format!(" and applications close on {}.", format_date(deadline)))
            }
            None => intro.push('.'),
        }

        let mut role = Section::new("About the Role");
        let mut description_sub = Subsection::new("Job Description");
        match description {
            Some(text) => {
                for paragraph in text.lines().filter_map(non_blank) {
                    description_sub = description_sub.paragraph(paragraph);
                }
            }
            None => {
                description_sub = description_sub.paragraph(format!(
                    "{organization} has not published a full description for this position on {site}. The original vacancy announcement contains the complete terms of reference, including responsibilities, reporting lines and contract details."
                ));
            }
        }
        role = role.subsection(description_sub);

        if let Some(qualifications) = job.qualifications.as_deref().and_then(non_blank) {
            let mut sub = Subsection::new("Qualifications");
            for paragraph in qualifications.lines().filter_map(non_blank) {
                sub = sub.paragraph(paragraph);
            }
            role = role.subsection(sub);
        }

        let mut apply = Subsection::new("How to Apply");
        apply = match job.how_to_apply.as_deref().and_then(non_blank) {
            Some(text) => apply.paragraph(text),
            None => apply.paragraph(
                "Applications are handled by the hiring organization. Read the original announcement carefully and submit your application through the channel it specifies before the closing date.",
            ),
        };
        if let Some(url) = job.source_url.as_deref().and_then(non_blank) {
            apply = apply.block(Block::Paragraph(vec![
                Inline::text("Original announcement:"),
                Inline::link(url, url),
            ]));
        }
        role = role.subsection(apply);

        let mut details: Vec<Vec<Inline>> = Vec::new();
        for (label, value) in [
            ("Organization", job.organization.as_str()),
            ("Location", job.location.as_str()),
            ("Country", job.country.as_str()),
            ("Sector", job.sector.as_str()),
        ] {
            if let Some(value) = non_blank(value) {
                details.push(vec![Inline::strong(format!("{label}:")), Inline::text(value)]);
            }
        }
        details.push(vec![
            Inline::strong("Posted:"),
            Inline::text(format_date(job.date_posted)),
        ]);
        if let Some(deadline) = job.deadline {
            details.push(vec![
                Inline::strong("Closing date:"),
                Inline::text(format_date(deadline)),
            ]);
        }

        let country_heading = match non_blank(&job.country) {
            Some(country) => format!("Working in {country}"),
            None => "Working in the Field".to_string(),
        };
        let sector_heading = match non_blank(&job.sector) {
            Some(sector) => format!("The {sector} Sector"),
            None => "Working Across Sectors".to_string(),
        };
        let context = Section::new("Country and Sector Context")
            .subsection(
                Subsection::new(country_heading).paragraph(self.context.country(&job.country)),
            )
            .subsection(Subsection::new(sector_heading).paragraph(self.context.sector(&job.sector)));

        Document::new(head, title)
            .intro(Block::text(intro))
            .section(role)
            .section(Section::new("Key Details").block(Block::List(details)))
            .section(context)
    }

    fn head(
        &self,
        meta: &SeoMeta,
        path: &str,
        og_type: &'static str,
        structured_data: Vec<serde_json::Value>,
    ) -> Head {
        Head {
            title: meta.title.clone(),
            description: meta.description.clone(),
            keywords: meta.keywords.clone(),
            canonical_url: self.config.absolute_url(path),
            og_type,
            site_name: self.config.site_name.clone(),
            structured_data,
        }
    }
}

/// Boilerplate sections appended, in order, until a page reaches its floor.
pub(crate) fn padding_sections(site_name: &str) -> Vec<Section> {
    vec![
        Section::new("Working in Humanitarian Settings")
            .paragraph("Humanitarian work brings together people with very different skills, from doctors and engineers to accountants, drivers and community mobilisers. What they share is a commitment to help people affected by crises and to do so in line with the principles of humanity, neutrality, impartiality and independence.")
            .subsection(Subsection::new("Field and Office Roles").paragraph("Many positions are based in field locations close to affected communities, while others support operations from capital cities, regional hubs or headquarters. Field roles can involve shared accommodation, movement restrictions and long working hours, and they offer direct contact with the impact of the work.")),
        Section::new("Preparing a Strong Application")
            .paragraph("Read the vacancy announcement carefully and tailor your application to the responsibilities and requirements it lists. Recruiters look for concrete examples of results you have achieved, the context you worked in and the size of the teams and budgets you managed.")
            .subsection(Subsection::new("Before You Apply").paragraph("Check the closing date, the required languages and any eligibility rules on nationality or work permits. Keep your references informed, and make sure your CV explains gaps and short contracts, which are common in this sector.")),
        Section::new("Staying Safe and Well")
            .paragraph("Reputable organizations provide security briefings, insurance and support for staff wellbeing, and they never ask candidates to pay fees at any stage of recruitment. Treat any request for payment, or any offer made without an interview, as a warning sign.")
            .subsection(Subsection::new("Looking After Yourself").paragraph("Working in crisis settings can be demanding. Plan for rest and recuperation, stay connected with colleagues and family, and make use of the psychosocial support services that your employer offers.")),
        Section::new(format!("About {site_name}"))
            .paragraph(format!("{site_name} gathers vacancies published by humanitarian and development organizations and presents them in a consistent, searchable format. Listings link back to the original announcement, and all applications go directly to the hiring organization."))
            .subsection(Subsection::new("Keeping Listings Current").paragraph("Vacancies are refreshed several times a day, and expired positions are removed as their closing dates pass. If a listing looks out of date or inaccurate, check the original announcement, which always takes precedence.")),
    ]
}

fn listing_item(job: &JobRecord) -> Vec<Inline> {
    let mut item = vec![Inline::link(format!("/jobs/{}", job.id), job.title.clone())];
    let context = join_nonempty(&[&job.organization, &job.location, &job.country], ", ");
    if !context.is_empty() {
        item.push(Inline::text(format!("- {context}")));
    }
    item
}

fn record_summary(job: &JobRecord) -> Vec<Inline> {
    let mut summary = Vec::new();
    if let Some(org) = non_blank(&job.organization) {
        summary.push(Inline::strong(org));
    }
    let mut text = String::new();
    let place = join_nonempty(&[&job.location, &job.country], ", ");
    if !place.is_empty() {
        text.push_str(&format!("{place}. "));
    }
    if let Some(sector) = non_blank(&job.sector) {
        text.push_str(&format!("Sector: {sector}. "));
    }
    text.push_str(&format!("Posted {}.", format_date(job.date_posted)));
    if let Some(deadline) = job.deadline {
        text.push_str(&format!(" Closing date {}.", format_date(deadline)));
    }
    summary.push(Inline::text(text));
    summary
}

fn format_date(ts: Timestamp) -> String {
    ts.format("%-d %B %Y").to_string()
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn join_nonempty(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .filter_map(|p| non_blank(p))
        .collect::<Vec<_>>()
        .join(sep)
}

/// "Kenya", "Kenya and Uganda", "Kenya, Uganda and Somalia".
fn display_list(values: &[String]) -> String {
    let values: Vec<&str> = values.iter().filter_map(|v| non_blank(v)).collect();
    match values.as_slice() {
        [] => String::new(),
        [one] => one.to_string(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

/// Canonical listing path with its query string.
fn listing_path(filters: &JobFilters) -> String {
    let mut params = Vec::new();
    let countries: Vec<&str> = filters.country.iter().filter_map(|c| non_blank(c)).collect();
    if !countries.is_empty() {
        params.push(format!("country={}", encode_query_value(&countries.join(","))));
    }
    let sectors: Vec<&str> = filters.sector.iter().filter_map(|s| non_blank(s)).collect();
    if !sectors.is_empty() {
        params.push(format!("sector={}", encode_query_value(&sectors.join(","))));
    }
    if let Some(term) = filters.search_term() {
        params.push(format!("search={}", encode_query_value(term)));
    }
    if params.is_empty() {
        "/jobs".to_string()
    } else {
        format!("/jobs?{}", params.join("&"))
    }
}

/// Percent-encode a query value, keeping unreserved characters and commas.
fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b',' => {
                out.push(byte as char)
            }
            b' ' => out.push_str("%20"),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_list() {
        assert_eq!(display_list(&[]), "");
        assert_eq!(display_list(&["Kenya".to_string()]), "Kenya");
        assert_eq!(
            display_list(&["Kenya".to_string(), " ".to_string(), "Uganda".to_string(), "Somalia".to_string()]),
            "Kenya, Uganda and Somalia"
        );
    }

    #[test]
    fn test_listing_path() {
        assert_eq!(listing_path(&JobFilters::new()), "/jobs");
        let filters = JobFilters::new()
            .with_country("South Sudan")
            .with_country("Kenya")
            .with_search("R&D");
        assert_eq!(
            listing_path(&filters),
            "/jobs?country=South%20Sudan,Kenya&search=R%26D"
        );
    }

    #[test]
    fn test_padding_sections_each_have_subsections() {
        let sections = padding_sections("Relief Jobs");
        assert_eq!(sections.len(), 4);
        assert!(sections.iter().all(|s| !s.subsections().is_empty()));
        assert_eq!(sections[3].heading(), "About Relief Jobs");
    }
}
