use crate::{
    constraint::not_equal::NotEqual,
    error::Result,
    model::{Csp, Domain},
    problems::Problem,
};

/// Map coloring: give every region a color different from all of its
/// neighbors. Regions and colors are plain strings, one [`NotEqual`]
/// per border.
pub struct MapColoring {
    name: String,
    regions: Vec<(String, Vec<String>)>,
    colors: Vec<String>,
}

impl MapColoring {
    pub fn new(
        name: impl Into<String>,
        regions: Vec<(String, Vec<String>)>,
        colors: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            regions,
            colors,
        }
    }

    /// The classic Australia instance: six mainland states plus
    /// isolated Tasmania, three colors.
    pub fn australia() -> Self {
        let adj = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self::new(
            "Australia",
            vec![
                ("WA".into(), adj(&["NT", "SA"])),
                ("NT".into(), adj(&["WA", "SA", "Q"])),
                ("SA".into(), adj(&["WA", "NT", "Q", "NSW", "V"])),
                ("Q".into(), adj(&["NT", "SA", "NSW"])),
                ("NSW".into(), adj(&["Q", "SA", "V"])),
                ("V".into(), adj(&["SA", "NSW"])),
                ("T".into(), Vec::new()),
            ],
            vec!["Red".into(), "Green".into(), "Blue".into()],
        )
    }

    /// A western-US sample, four colors.
    pub fn usa_sample() -> Self {
        let adj = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self::new(
            "USA-Sample",
            vec![
                ("WA".into(), adj(&["OR", "ID"])),
                ("OR".into(), adj(&["WA", "ID", "NV", "CA"])),
                ("CA".into(), adj(&["OR", "NV", "AZ"])),
                ("NV".into(), adj(&["OR", "CA", "AZ", "UT", "ID"])),
                ("ID".into(), adj(&["WA", "OR", "NV", "UT", "WY", "MT"])),
                ("AZ".into(), adj(&["CA", "NV", "UT", "NM"])),
                ("UT".into(), adj(&["ID", "NV", "AZ", "CO", "WY"])),
                ("MT".into(), adj(&["ID", "WY", "ND", "SD"])),
                ("WY".into(), adj(&["MT", "ID", "UT", "CO", "NE", "SD"])),
                ("CO".into(), adj(&["WY", "UT", "NM", "KS", "NE", "OK"])),
                ("NM".into(), adj(&["AZ", "CO", "TX", "OK"])),
                ("ND".into(), adj(&["MT", "SD"])),
                ("SD".into(), adj(&["MT", "WY", "ND", "NE"])),
                ("NE".into(), adj(&["WY", "CO", "SD", "KS"])),
                ("KS".into(), adj(&["CO", "NE", "OK"])),
                ("OK".into(), adj(&["CO", "NM", "KS", "TX"])),
                ("TX".into(), adj(&["NM", "OK"])),
            ],
            vec!["Red".into(), "Green".into(), "Blue".into(), "Yellow".into()],
        )
    }

    /// A small European sample, four colors.
    pub fn europe_sample() -> Self {
        let adj = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self::new(
            "Europe-Sample",
            vec![
                (
                    "France".into(),
                    adj(&["Spain", "Belgium", "Germany", "Switzerland", "Italy"]),
                ),
                ("Spain".into(), adj(&["France", "Portugal"])),
                ("Portugal".into(), adj(&["Spain"])),
                ("Belgium".into(), adj(&["France", "Germany", "Netherlands"])),
                ("Netherlands".into(), adj(&["Belgium", "Germany"])),
                (
                    "Germany".into(),
                    adj(&[
                        "France",
                        "Belgium",
                        "Netherlands",
                        "Poland",
                        "Austria",
                        "Switzerland",
                    ]),
                ),
                (
                    "Switzerland".into(),
                    adj(&["France", "Germany", "Austria", "Italy"]),
                ),
                ("Italy".into(), adj(&["France", "Switzerland", "Austria"])),
                (
                    "Austria".into(),
                    adj(&["Germany", "Switzerland", "Italy", "Poland"]),
                ),
                ("Poland".into(), adj(&["Germany", "Austria"])),
            ],
            vec!["Red".into(), "Green".into(), "Blue".into(), "Yellow".into()],
        )
    }

    pub fn regions(&self) -> &[(String, Vec<String>)] {
        &self.regions
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }
}

impl Problem<String> for MapColoring {
    fn build(&self) -> Result<Csp<String>> {
        let mut builder = Csp::builder(self.name.clone());
        let color_domain = Domain::new(self.colors.iter().cloned());

        for (region, _) in &self.regions {
            builder.variable(region.clone(), color_domain.copy())?;
        }

        // Borders are listed from both sides; emit each once.
        let mut seen = std::collections::HashSet::new();
        for (region, neighbors) in &self.regions {
            for neighbor in neighbors {
                // A neighbor without its own entry (off-map region) is
                // skipped rather than invented.
                if builder.var_id(neighbor).is_err() {
                    continue;
                }
                let key = if region < neighbor {
                    (region.clone(), neighbor.clone())
                } else {
                    (neighbor.clone(), region.clone())
                };
                if seen.insert(key) {
                    let u = builder.var_id(region)?;
                    let v = builder.var_id(neighbor)?;
                    builder.constraint(NotEqual::new(u, v))?;
                }
            }
        }

        Ok(builder.build())
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn description(&self) -> String {
        format!(
            "Color {} regions with {} colors such that no adjacent regions share a color.",
            self.regions.len(),
            self.colors.len()
        )
    }
}
