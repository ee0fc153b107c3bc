/// Extract the bare type name from a full module path.
///
/// `"pricelens_pipeline::components::rank_selector::RankSelector"` becomes
/// `"RankSelector"`. Used for stage names in logs.
pub fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_module_path() {
        assert_eq!(short_type_name("a::b::Thing"), "Thing");
        assert_eq!(short_type_name("Thing"), "Thing");
    }
}
