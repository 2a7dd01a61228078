use focos_dashboard::dashboard::FilterOptions;
use focos_dashboard::filters::{
    parse_date_input, parse_frp_input, Criticality, FilterCriteria, FilterError, DATE_FORMAT,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Field currently focused in the filters form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    State,
    Biome,
    StartDate,
    EndDate,
    FrpMin,
    FrpMax,
    Criticality,
}

impl FilterField {
    pub const ALL: [Self; 7] = [
        Self::State,
        Self::Biome,
        Self::StartDate,
        Self::EndDate,
        Self::FrpMin,
        Self::FrpMax,
        Self::Criticality,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::State => "Estado",
            Self::Biome => "Bioma",
            Self::StartDate => "Data início",
            Self::EndDate => "Data fim",
            Self::FrpMin => "FRP mínimo",
            Self::FrpMax => "FRP máximo",
            Self::Criticality => "Criticidade",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::State => 0,
            Self::Biome => 1,
            Self::StartDate => 2,
            Self::EndDate => 3,
            Self::FrpMin => 4,
            Self::FrpMax => 5,
            Self::Criticality => 6,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::State),
            1 => Some(Self::Biome),
            2 => Some(Self::StartDate),
            3 => Some(Self::EndDate),
            4 => Some(Self::FrpMin),
            5 => Some(Self::FrpMax),
            6 => Some(Self::Criticality),
            _ => None,
        }
    }
}

/// Fuzzy-searchable single choice over an option list.
///
/// Selection `0` means "all"; `n > 0` is the n-th match of the current query.
/// A current value missing from the options is kept in `fallback` and stays
/// the choice until the picker is edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Picker {
    pub query: String,
    pub selected: usize,
    pub fallback: Option<String>,
}

impl Picker {
    fn preselect(current: Option<&str>, options: &[String]) -> Self {
        let position = current.and_then(|value| options.iter().position(|option| option == value));
        Self {
            query: String::new(),
            selected: position.map_or(0, |index| index + 1),
            fallback: current
                .filter(|_| position.is_none())
                .map(str::to_string),
        }
    }

    /// Moves a kept fallback onto the option list once it contains it.
    fn adopt(&mut self, options: &[String]) {
        let Some(value) = &self.fallback else {
            return;
        };
        if let Some(index) = options.iter().position(|option| option == value) {
            self.selected = index + 1;
            self.fallback = None;
        }
    }

    /// Options matching the query, best match first. An empty query keeps
    /// the original order.
    pub fn matches<'a>(&self, options: &'a [String]) -> Vec<&'a str> {
        let query = self.query.trim();
        if query.is_empty() {
            return options.iter().map(String::as_str).collect();
        }
        let matcher = SkimMatcherV2::default().ignore_case();
        let mut scored: Vec<(i64, &str)> = options
            .iter()
            .filter_map(|option| {
                matcher
                    .fuzzy_match(option, query)
                    .map(|score| (score, option.as_str()))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, option)| option).collect()
    }

    pub fn choice<'a>(&'a self, options: &'a [String]) -> Option<&'a str> {
        match self.selected.checked_sub(1) {
            Some(index) => self.matches(options).get(index).copied(),
            None => self.fallback.as_deref(),
        }
    }

    pub fn push(&mut self, ch: char, options: &[String]) {
        self.fallback = None;
        self.query.push(ch);
        self.selected = usize::from(!self.matches(options).is_empty());
    }

    pub fn pop(&mut self, options: &[String]) {
        self.fallback = None;
        self.query.pop();
        self.selected = usize::from(!self.query.is_empty() && !self.matches(options).is_empty());
    }

    pub fn cycle(&mut self, options: &[String], forward: bool) {
        self.fallback = None;
        let len = self.matches(options).len() + 1;
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
    }
}

/// Editable copy of the filters, applied on Enter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterForm {
    pub field: FilterField,
    pub state: Picker,
    pub biome: Picker,
    pub start_date: String,
    pub end_date: String,
    pub frp_min: String,
    pub frp_max: String,
    pub criticality: Option<Criticality>,
    pub error: Option<String>,
}

impl FilterForm {
    pub fn from_criteria(criteria: &FilterCriteria, options: &FilterOptions) -> Self {
        let date = |value: Option<chrono::NaiveDate>| {
            value.map_or_else(String::new, |d| d.format(DATE_FORMAT).to_string())
        };
        let frp = |value: Option<f64>| value.map_or_else(String::new, |v| v.to_string());
        Self {
            field: FilterField::State,
            state: Picker::preselect(criteria.state(), &options.states),
            biome: Picker::preselect(criteria.biome(), &options.biomes),
            start_date: date(criteria.start_date),
            end_date: date(criteria.end_date),
            frp_min: frp(criteria.frp_min),
            frp_max: frp(criteria.frp_max),
            criticality: criteria.criticality,
            error: None,
        }
    }

    /// New criteria from the form; fields the form does not edit come from `base`.
    pub fn to_criteria(
        &self,
        base: &FilterCriteria,
        options: &FilterOptions,
    ) -> Result<FilterCriteria, FilterError> {
        let criteria = FilterCriteria {
            state: self.state.choice(&options.states).map(str::to_string),
            biome: self.biome.choice(&options.biomes).map(str::to_string),
            start_date: parse_date_input(&self.start_date)?,
            end_date: parse_date_input(&self.end_date)?,
            frp_min: parse_frp_input(&self.frp_min)?,
            frp_max: parse_frp_input(&self.frp_max)?,
            criticality: self.criticality,
            ..base.clone()
        };
        criteria.validate()?;
        Ok(criteria)
    }

    pub fn cycle_criticality(&mut self, forward: bool) {
        let position = self
            .criticality
            .and_then(|c| Criticality::ALL.iter().position(|x| *x == c))
            .map_or(0, |index| index + 1);
        let len = Criticality::ALL.len() + 1;
        let next = if forward {
            (position + 1) % len
        } else {
            (position + len - 1) % len
        };
        self.criticality = next.checked_sub(1).and_then(Criticality::from_index);
    }

    /// Picks up options that arrived after the form was built.
    pub fn refresh_options(&mut self, options: &FilterOptions) {
        self.state.adopt(&options.states);
        self.biome.adopt(&options.biomes);
    }

    /// The free-text input behind the focused field, if it has one.
    pub fn text_input_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FilterField::StartDate => Some(&mut self.start_date),
            FilterField::EndDate => Some(&mut self.end_date),
            FilterField::FrpMin => Some(&mut self.frp_min),
            FilterField::FrpMax => Some(&mut self.frp_max),
            FilterField::State | FilterField::Biome | FilterField::Criticality => None,
        }
    }
}
