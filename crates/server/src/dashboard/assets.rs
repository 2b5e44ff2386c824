/// Static file compiled into the binary
pub struct Asset {
    pub content_type: &'static str,
    pub body: &'static str,
}

/// Look up an embedded asset by its path below `/assets/`
pub fn lookup(path: &str) -> Option<&'static Asset> {
    ASSETS
        .iter()
        .find_map(|(name, asset)| (*name == path).then_some(asset))
}

static ASSETS: &[(&str, Asset)] = &[(
    "css/style.css",
    Asset {
        content_type: "text/css; charset=utf-8",
        body: include_str!("../../assets/css/style.css"),
    },
)];
