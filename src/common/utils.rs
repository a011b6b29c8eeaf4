use std::collections::{BTreeMap, BTreeSet};
use regex::{Captures, Regex};

pub fn merge(maps: &[&BTreeMap<String, String>]) -> BTreeMap<String, String> {
    let mut merged = BTreeMap::new();
    for map in maps {
        for (k, v) in map.iter() {
            merged.insert(k.clone(), v.clone());
        }
    }
    merged
}

pub fn split(list: &str) -> Vec<String> {
    let set = list.split(',').map(str::trim).filter(|s| !s.is_empty()).collect::<BTreeSet<_>>();
    set.into_iter().map(String::from).collect()
}

pub fn remove_empty(list: Vec<String>) -> Vec<String> {
    list.into_iter().map(|s| s.trim().to_owned()).filter(|s| !s.is_empty()).collect()
}

// Replaces occurrences of a printf-like format ("$%s" by default) with the
// named variable. Unknown names stay verbatim.
#[derive(Clone, Debug)]
pub struct VarFormat {
    re: Regex,
}

impl VarFormat {
    pub fn new(format: &str) -> Result<Self, regex::Error> {
        let format = match format.contains("%s") {
            true  => format,
            false => "$%s",
        };

        let mut parts = format.splitn(2, "%s");
        let prefix = parts.next().unwrap_or("");
        let suffix = parts.next().unwrap_or("");

        let re = format!("{}([A-Za-z_][A-Za-z0-9_]*){}", regex::escape(prefix), regex::escape(suffix));

        Ok(Self { re: Regex::new(&re)? })
    }

    pub fn expand(&self, text: &str, vars: &BTreeMap<String, String>) -> String {
        self.re.replace_all(text, |caps: &Captures| {
            match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None        => caps[0].to_owned(),
            }
        }).into_owned()
    }
}
