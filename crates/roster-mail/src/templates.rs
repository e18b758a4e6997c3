use chrono::{Local, NaiveDate};

pub struct EmailTemplate {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// People listed as organization members in the directory but missing from
/// the organization's public page.
#[derive(Debug, Clone)]
pub struct MembershipReport {
    pub group_label: String,
    pub website: String,
    pub missing: Vec<String>,
    period: String,
}

impl MembershipReport {
    /// A report dated in the current month.
    pub fn new(
        group_label: impl Into<String>,
        website: impl Into<String>,
        missing: Vec<String>,
    ) -> Self {
        Self::for_month(Local::now().date_naive(), group_label, website, missing)
    }

    pub fn for_month(
        date: NaiveDate,
        group_label: impl Into<String>,
        website: impl Into<String>,
        missing: Vec<String>,
    ) -> Self {
        Self {
            group_label: group_label.into(),
            website: website.into(),
            missing,
            period: date.format("%Y-%m").to_string(),
        }
    }

    /// `YYYY-MM` of the report.
    pub fn period(&self) -> &str {
        &self.period
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn subject(&self) -> String {
        format!("{} Update on {} Members", self.period, self.group_label)
    }

    pub fn body(&self) -> String {
        format!(
            "Hello!\n\n\
             This is an automatic update on the current members of {label}. The program looks at \
             who is officially a member of {label} in the University system, then looks at the \
             members of\n{website} and sees who is missing.\n\n\
             The following people are considered to be members of {label}, but are not currently \
             on its people page:\n{names}\n\n\
             Best wishes,\nComputer",
            label = self.group_label,
            website = self.website,
            names = self.missing.join(", "),
        )
    }

    pub fn render(&self, to: &str) -> EmailTemplate {
        EmailTemplate {
            to: to.to_string(),
            subject: self.subject(),
            body: self.body(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> MembershipReport {
        MembershipReport::for_month(
            NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date"),
            "Social Data Science Centre",
            "https://www.helsinki.fi/en/networks/centre-social-data-science/people",
            vec!["Jim Beam".to_string(), "Maria Valaste".to_string()],
        )
    }

    #[test]
    fn test_subject_carries_month_and_label() {
        assert_eq!(
            report().subject(),
            "2024-03 Update on Social Data Science Centre Members"
        );
    }

    #[test]
    fn test_render_lists_missing_members() {
        let email = report().render("lead@example.com");
        assert_eq!(email.to, "lead@example.com");
        assert!(email.body.starts_with("Hello!"));
        assert!(email.body.contains("Jim Beam, Maria Valaste"));
        assert!(email
            .body
            .contains("https://www.helsinki.fi/en/networks/centre-social-data-science/people"));
        assert!(email.body.ends_with("Best wishes,\nComputer"));
    }

    #[test]
    fn test_empty_report() {
        let report = MembershipReport::new("CSDS", "https://example.com/people", Vec::new());
        assert!(report.is_empty());
        assert_eq!(report.period().len(), 7);
    }
}
