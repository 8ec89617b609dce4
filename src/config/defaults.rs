pub(super) fn default_id_scheme() -> String {
    "uuid".to_string()
}

pub(super) fn default_id_prefix() -> String {
    "toast".to_string()
}
