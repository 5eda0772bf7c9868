pub trait ExternalText {
    fn cleaned(&self) -> Self;

    fn clean(&self, value: &str) -> String {
        value.trim().to_string()
    }
}
