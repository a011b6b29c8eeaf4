use std::collections::BTreeMap;
use log::{debug, trace};
use serde::Serialize;
use serde_json::{Map, Value};
use crate::common::{merge, render_or_raw, Labels, Object, Render, VarFormat, Vars};
use crate::common::{BaseAvailability, BaseConfig, BaseMetric, BaseQuality};
use super::config::{include, Config};
use super::Error;

pub const QUALITY_QUERY: &str = "sum_over_time((($query) > bool 0)[$range:$every]) / $points";

#[derive(Clone, Debug, Default)]
pub struct PrometheusHttpOptions {
    pub interval:          String,
    pub url:               String,
    pub user:              String,
    pub password:          String,
    pub version:           String,
    pub params:            String,
    pub timeout:           String,
    pub duration:          String,
    pub prefix:            String,
    pub quality_name:      String,
    pub quality_range:     String,
    pub quality_every:     String,
    pub quality_points:    u32,
    pub quality_query:     String,
    pub availability_name: String,
    pub metric_name:       String,
    pub default_tags:      Vec<String>,
    pub var_format:        String,
}

#[derive(Clone, Debug, Serialize)]
pub struct PrometheusHttp {
    pub name:            String,
    pub url:             String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user:            String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password:        String,
    pub version:         String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub params:          String,
    pub interval:        String,
    pub timeout:         String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub duration:        String,
    pub prefix:          String,
    pub skip_empty_tags: bool,
    #[serde(rename = "taginclude")]
    pub include:         Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags:            Labels,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub file:            Vec<PrometheusHttpFile>,
    pub metric:          Vec<PrometheusHttpMetric>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PrometheusHttpFile {
    pub name: String,
    pub path: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct PrometheusHttpMetric {
    pub name:      String,
    pub query:     String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unique_by: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags:      Labels,
}

struct Query<'a> {
    format: &'a VarFormat,
    vars:   Vars,
    ctx:    Value,
    render: &'a dyn Render,
}

impl<'a> Query<'a> {
    fn new(format: &'a VarFormat, vars: Vars, files: &Map<String, Value>, render: &'a dyn Render) -> Self {
        let mut ctx = vars.iter().map(|(k, v)| {
            (k.clone(), Value::String(v.clone()))
        }).collect::<Map<_, _>>();
        ctx.insert("files".to_owned(), Value::Object(files.clone()));
        Self { format, vars, ctx: Value::Object(ctx), render }
    }

    fn expand(&self, query: &str) -> String {
        let query = self.format.expand(query, &self.vars);
        match query.contains("{{") {
            true  => render_or_raw(self.render, &query, &self.ctx),
            false => query.trim().to_owned(),
        }
    }
}

impl Config {
    pub fn add_prometheus_http(
        &mut self,
        name:   &str,
        object: &Object,
        tags:   &str,
        opts:   &PrometheusHttpOptions,
        render: &dyn Render,
    ) -> Result<(), Error> {
        let format = VarFormat::new(&opts.var_format)?;
        let placeholders = VarFormat::new("$%s")?;

        let mut files = Map::new();
        let mut input = PrometheusHttp {
            name:            name.to_owned(),
            url:             opts.url.clone(),
            user:            opts.user.clone(),
            password:        opts.password.clone(),
            version:         opts.version.clone(),
            params:          opts.params.clone(),
            interval:        opts.interval.clone(),
            timeout:         opts.timeout.clone(),
            duration:        opts.duration.clone(),
            prefix:          opts.prefix.clone(),
            skip_empty_tags: true,
            include:         Vec::new(),
            tags:            Labels::new(),
            file:            Vec::new(),
            metric:          Vec::new(),
        };

        for (k, file) in &object.files {
            input.file.push(PrometheusHttpFile {
                name: k.clone(),
                path: file.path.clone(),
                kind: file.kind.clone(),
            });
            files.insert(k.clone(), file.obj.clone());
        }

        for (k, config) in &object.configs {
            if config.disabled {
                debug!("{}: config {} disabled", name, k);
                continue;
            }

            if config.is_empty() {
                debug!("{}: config {} has no queries", name, k);
                continue;
            }

            // Labels are taken from the config alone, only vars are merged.
            let labels = &config.labels;
            let vars   = merge(&[&object.vars, &config.vars]);
            let query  = Query::new(&format, vars, &files, render);

            let before = input.metric.len();
            input.metric.extend(qualities(config, opts, labels, &placeholders, &query));
            input.metric.extend(availability(config.availability.as_ref(), opts, labels, &query));
            input.metric.extend(metrics(&config.metrics, opts, labels, &query));
            trace!("{}: config {} produced {} metrics", name, k, input.metric.len() - before);
        }

        if input.metric.is_empty() {
            return Err(Error::NoMetrics);
        }

        input.tags    = parse_tags(tags, &object.vars, render);
        input.include = {
            let metric = input.metric.iter().flat_map(|m| m.tags.keys());
            include(&opts.default_tags, input.tags.keys().chain(metric))
        };

        self.add(input);

        Ok(())
    }
}

fn qualities(
    config:       &BaseConfig,
    opts:         &PrometheusHttpOptions,
    labels:       &Labels,
    placeholders: &VarFormat,
    query:        &Query,
) -> Option<PrometheusHttpMetric> {
    let template = match opts.quality_query.trim() {
        ""       => QUALITY_QUERY,
        template => template,
    };

    let windows = config.qualities.iter().filter(|q| {
        !q.disabled && !q.query.trim().is_empty()
    }).map(|q| {
        let weight = q.weight.unwrap_or(1).max(1);
        (weight, window(template, placeholders, q, opts, query))
    }).collect::<Vec<_>>();

    let total = windows.iter().map(|(w, _)| u64::from(*w)).sum::<u64>();

    let query = match windows.as_slice() {
        []          => return None,
        [(1, expr)] => expr.clone(),
        _           => {
            let sum = windows.iter().map(|(weight, expr)| match weight {
                1 => format!("({})", expr),
                w => format!("{} * ({})", w, expr),
            }).collect::<Vec<_>>().join(" + ");
            format!("({}) / {}", sum, total)
        }
    };

    Some(PrometheusHttpMetric {
        name:      opts.quality_name.clone(),
        query:     query,
        unique_by: Vec::new(),
        tags:      labels.clone(),
    })
}

fn window(template: &str, placeholders: &VarFormat, q: &BaseQuality, opts: &PrometheusHttpOptions, query: &Query) -> String {
    let or = |v: &str, def: &str| match v.trim() {
        "" => def.to_owned(),
        v  => v.to_owned(),
    };

    let points = match q.points {
        0 => opts.quality_points,
        n => n,
    };

    let mut values = Vars::new();
    values.insert("query".to_owned(),  query.expand(&q.query));
    values.insert("range".to_owned(),  or(&q.range, &opts.quality_range));
    values.insert("every".to_owned(),  or(&q.every, &opts.quality_every));
    values.insert("points".to_owned(), points.max(1).to_string());

    placeholders.expand(template, &values)
}

fn availability(availability: Option<&BaseAvailability>, opts: &PrometheusHttpOptions, labels: &Labels, query: &Query) -> Vec<PrometheusHttpMetric> {
    let availability = match availability {
        Some(a) if !a.disabled => a,
        _                      => return Vec::new(),
    };

    availability.queries.iter().filter(|q| !q.query.trim().is_empty()).map(|q| {
        PrometheusHttpMetric {
            name:      opts.availability_name.clone(),
            query:     query.expand(&q.query),
            unique_by: Vec::new(),
            tags:      merge(&[labels, &q.labels]),
        }
    }).collect()
}

fn metrics(metrics: &[BaseMetric], opts: &PrometheusHttpOptions, labels: &Labels, query: &Query) -> Vec<PrometheusHttpMetric> {
    metrics.iter().filter(|m| !m.disabled && !m.query.trim().is_empty()).map(|m| {
        let name = match m.name.trim() {
            ""   => opts.metric_name.clone(),
            name => name.to_owned(),
        };

        let mut unique_by = m.unique_by.clone();
        unique_by.sort();
        unique_by.dedup();

        PrometheusHttpMetric {
            name:      name,
            query:     query.expand(&m.query),
            unique_by: unique_by,
            tags:      merge(&[labels, &m.labels]),
        }
    }).collect()
}

// Rendered tags template: `key=value` pairs separated by commas or newlines.
fn parse_tags(template: &str, vars: &Vars, render: &dyn Render) -> Labels {
    if template.trim().is_empty() {
        return Labels::new();
    }

    let ctx = vars.iter().map(|(k, v)| {
        (k.clone(), Value::String(v.clone()))
    }).collect::<Map<_, _>>();
    let rendered = render_or_raw(render, template, &Value::Object(ctx));

    rendered.split(|c: char| c == ',' || c == '\n').filter_map(|pair| {
        let mut kv = pair.splitn(2, '=');
        let k = kv.next()?.trim();
        let v = kv.next()?.trim();
        match k.is_empty() {
            true  => None,
            false => Some((k.to_owned(), v.to_owned())),
        }
    }).collect()
}
