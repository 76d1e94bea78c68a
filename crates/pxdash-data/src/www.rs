// Last-trade prices are carried forward by the service when a security
// did not trade; `lookback=2` asks for the latest observation plus the
// one preceding it, which is all the change column needs.
const FILL: &str = "prev";
const LOOKBACK: u8 = 2;

pub fn quote_url(base: &str, sedol: &str) -> String {
    format!(
        "{}/v1/quotes/{}?fill={}&lookback={}",
        base.trim_end_matches('/'),
        sedol.to_uppercase(),
        FILL,
        LOOKBACK
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_quote_url() {
        assert_eq!(
            quote_url("http://localhost:9581/", "b0ybkj7"),
            "http://localhost:9581/v1/quotes/B0YBKJ7?fill=prev&lookback=2"
        );
    }
}
