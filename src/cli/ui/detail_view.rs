/// A key/value pair shown in a detail view.
pub struct DetailField {
    pub key: String,
    pub value: String,
}

/// Title plus aligned `key: value` lines.
pub struct DetailView {
    pub title: String,
    pub fields: Vec<DetailField>,
}

impl DetailView {
    pub fn new<T: Into<String>>(title: T) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.fields.push(DetailField {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    pub fn render(&self) -> String {
        let key_width = self
            .fields
            .iter()
            .map(|field| field.key.chars().count())
            .max()
            .unwrap_or(0);
        let mut lines = vec![self.title.clone()];
        for field in &self.fields {
            lines.push(format!(
                "  {:<width$}  {}",
                format!("{}:", field.key),
                field.value,
                width = key_width + 1
            ));
        }
        lines.join("\n")
    }
}
