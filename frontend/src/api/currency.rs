use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, ConversionResult, ConvertRequest, ExchangeRate},
};

impl ApiClient {
    pub async fn get_exchange_rate(&self, from: &str, to: &str) -> Result<ExchangeRate, ApiError> {
        self.get_json_with_query(
            "/currency/exchange-rate",
            &[("from", from.to_uppercase()), ("to", to.to_uppercase())],
        )
        .await
    }

    pub async fn convert_currency(
        &self,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Result<ConversionResult, ApiError> {
        let body = ConvertRequest {
            amount,
            from: from.to_uppercase(),
            to: to.to_uppercase(),
        };
        self.send_json(Method::POST, "/currency/convert", &body).await
    }
}
