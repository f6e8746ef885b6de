use chrono::TimeDelta;

#[derive(Clone, Debug)]
pub struct Config {
	pub listen_address: String,
	pub production:     bool,

	pub access_token_name:     String,
	pub access_token_lifetime: TimeDelta,

	/// How far back the loaded reservation window reaches by default
	pub reservation_lookback: TimeDelta,
	/// Base hue the display palette is rotated from
	pub palette_hue:          f32,
}

impl Config {
	fn get_env_var(var: &str, default: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| default.to_string())
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if an environment variable is set but malformed
	#[must_use]
	pub fn from_env() -> Self {
		let listen_address =
			Self::get_env_var("LISTEN_ADDRESS", "0.0.0.0:8000");
		let production = Self::get_env_var("PRODUCTION", "false")
			.parse::<bool>()
			.unwrap();

		let access_token_name =
			Self::get_env_var("ACCESS_TOKEN_NAME", "gearbook_access_token");
		let access_token_lifetime = TimeDelta::minutes(
			Self::get_env_var("ACCESS_TOKEN_LIFETIME_MINUTES", "720")
				.parse::<i64>()
				.unwrap(),
		);

		let reservation_lookback = TimeDelta::days(
			Self::get_env_var("RESERVATION_LOOKBACK_DAYS", "30")
				.parse::<i64>()
				.unwrap(),
		);
		let palette_hue = Self::get_env_var("PALETTE_HUE", "5")
			.parse::<f32>()
			.unwrap();

		Self {
			listen_address,
			production,
			access_token_name,
			access_token_lifetime,
			reservation_lookback,
			palette_hue,
		}
	}
}
