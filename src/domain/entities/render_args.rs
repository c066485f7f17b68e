//! Renderer arguments carried from the submitter to the worker

use std::fmt;

/// Value of one renderer argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// Bare switch (`--disable-motionblur`)
    Switch,
    /// Single value (`--renderer BRAY_HdKarmaXPU`)
    Value(String),
    /// Two values (`--res 1920 1080`)
    Pair(String, String),
}

impl ArgValue {
    /// Text stored in the plugin info file.
    pub fn to_info_value(&self) -> String {
        match self {
            ArgValue::Switch => "True".to_string(),
            ArgValue::Value(v) => v.clone(),
            ArgValue::Pair(a, b) => format!("{} {}", a, b),
        }
    }

    /// Read back a plugin info value. `False` and empty values mean the
    /// argument is absent.
    pub fn from_info_value(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("false") {
            return None;
        }
        if value.eq_ignore_ascii_case("true") {
            return Some(ArgValue::Switch);
        }
        Some(ArgValue::Value(value.to_string()))
    }

    /// Reinterpret a read-back `Value` as a two-value argument.
    pub fn into_pair(self) -> Self {
        let ArgValue::Value(text) = &self else {
            return self;
        };
        let mut parts = text.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), None) => ArgValue::Pair(a.to_string(), b.to_string()),
            _ => self,
        }
    }
}

/// One renderer flag and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderArg {
    pub flag: String,
    pub value: ArgValue,
}

impl RenderArg {
    pub fn switch(flag: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            value: ArgValue::Switch,
        }
    }

    pub fn value(flag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            value: ArgValue::Value(value.into()),
        }
    }

    pub fn pair(flag: impl Into<String>, a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            value: ArgValue::Pair(a.into(), b.into()),
        }
    }

    /// Command line tokens for this argument.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = vec![self.flag.clone()];
        match &self.value {
            ArgValue::Switch => {}
            ArgValue::Value(v) => tokens.push(v.clone()),
            ArgValue::Pair(a, b) => {
                tokens.push(a.clone());
                tokens.push(b.clone());
            }
        }
        tokens
    }
}

/// Ordered renderer arguments. Later arguments with the same flag replace
/// earlier ones in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderArgs(Vec<RenderArg>);

impl RenderArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, arg: RenderArg) {
        if let Some(existing) = self.0.iter_mut().find(|a| a.flag == arg.flag) {
            *existing = arg;
        } else {
            self.0.push(arg);
        }
    }

    pub fn get(&self, flag: &str) -> Option<&ArgValue> {
        self.0.iter().find(|a| a.flag == flag).map(|a| &a.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderArg> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn flags(&self) -> Vec<&str> {
        self.0.iter().map(|a| a.flag.as_str()).collect()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.0.iter().flat_map(RenderArg::tokens).collect()
    }
}

impl FromIterator<RenderArg> for RenderArgs {
    fn from_iter<I: IntoIterator<Item = RenderArg>>(iter: I) -> Self {
        let mut args = RenderArgs::new();
        for arg in iter {
            args.push(arg);
        }
        args
    }
}

impl fmt::Display for RenderArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens().join(" "))
    }
}
