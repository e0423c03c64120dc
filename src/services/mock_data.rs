//! Mock air quality dataset generator
//!
//! Produces the dashboard payload entirely from literals plus the route
//! derivation arithmetic, then writes one JSON file per top-level key
//! and a combined file. Everything except the timestamps and fetch
//! duration is a pure function of the literals, so repeated runs emit
//! byte-identical trend/location/weather files.

use crate::domain::route::{BaseRoute, RoutePlan};
use crate::domain::types::iso_now;
use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct PollutantPair {
    pub pm25: i64,
    pub pm10: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentAqi {
    pub aqi: i64,
    pub city: String,
    pub timestamp: String,
    pub pollutants: PollutantPair,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendDay {
    pub day: &'static str,
    #[serde(rename = "PM25")]
    pub pm25: i64,
    #[serde(rename = "PM10")]
    pub pm10: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationReading {
    pub name: &'static str,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HourlyExposure {
    pub time: &'static str,
    pub value: i64,
    pub temperature: i64,
    pub humidity: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentWeather {
    pub temperature: i64,
    pub humidity: i64,
    pub wind_speed: i64,
    pub wind_direction: &'static str,
    pub precipitation: i64,
    pub pressure: i64,
    pub conditions: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeatherCorrelation {
    pub parameter: &'static str,
    pub correlation: f64,
    pub effect: &'static str,
    pub impact_level: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastSlot {
    pub hour: &'static str,
    pub temperature: i64,
    pub humidity: i64,
    pub wind_speed: i64,
    pub aqi_forecast: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonalPattern {
    pub month: &'static str,
    pub avg_temp: i64,
    pub avg_humidity: i64,
    pub avg_aqi: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AqiLevel {
    pub level: &'static str,
    pub description: &'static str,
    pub health_implications: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailedWeather {
    pub current_weather: CurrentWeather,
    pub correlations: Vec<WeatherCorrelation>,
    pub hourly_forecast: Vec<ForecastSlot>,
    pub seasonal_patterns: Vec<SeasonalPattern>,
    pub aqi_levels_explanation: Vec<AqiLevel>,
}

/// Which sources contributed to the dataset
#[derive(Debug, Clone, Serialize)]
pub struct DataSources {
    pub current_aqi: bool,
    pub openaq: bool,
    pub weather: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MockMetadata {
    pub last_updated: String,
    pub fetch_time_seconds: f64,
    pub data_sources: DataSources,
}

/// The full mock dashboard dataset
#[derive(Debug, Clone, Serialize)]
pub struct MockDataset {
    pub current_aqi: CurrentAqi,
    pub weekly_trend: Vec<TrendDay>,
    pub locations: Vec<LocationReading>,
    pub hourly_exposure: Vec<HourlyExposure>,
    pub route_optimization: Vec<RoutePlan>,
    pub detailed_weather: DetailedWeather,
    pub metadata: MockMetadata,
}

impl MockDataset {
    /// Build the dataset from literals and route arithmetic
    pub fn generate() -> Self {
        let started = Instant::now();

        let current_aqi = CurrentAqi {
            aqi: 156,
            city: "Kathmandu".to_string(),
            timestamp: iso_now(),
            pollutants: PollutantPair { pm25: 78, pm10: 125 },
        };

        let weekly_trend = vec![
            TrendDay { day: "Mon", pm25: 65, pm10: 110 },
            TrendDay { day: "Tue", pm25: 75, pm10: 130 },
            TrendDay { day: "Wed", pm25: 90, pm10: 145 },
            TrendDay { day: "Thu", pm25: 70, pm10: 115 },
            TrendDay { day: "Fri", pm25: 55, pm10: 95 },
            TrendDay { day: "Sat", pm25: 40, pm10: 80 },
            TrendDay { day: "Sun", pm25: 85, pm10: 140 },
        ];

        let locations = vec![
            LocationReading { name: "Thamel", value: 65 },
            LocationReading { name: "Kalanki", value: 180 },
            LocationReading { name: "Balaju", value: 125 },
            LocationReading { name: "Bhaktapur", value: 80 },
            LocationReading { name: "Lalitpur", value: 55 },
        ];

        let hourly_exposure = vec![
            HourlyExposure { time: "6am", value: 15, temperature: 20, humidity: 65 },
            HourlyExposure { time: "8am", value: 85, temperature: 22, humidity: 60 },
            HourlyExposure { time: "10am", value: 60, temperature: 24, humidity: 55 },
            HourlyExposure { time: "12pm", value: 45, temperature: 26, humidity: 50 },
            HourlyExposure { time: "2pm", value: 30, temperature: 28, humidity: 45 },
            HourlyExposure { time: "4pm", value: 55, temperature: 27, humidity: 48 },
            HourlyExposure { time: "6pm", value: 95, temperature: 25, humidity: 52 },
            HourlyExposure { time: "8pm", value: 40, temperature: 23, humidity: 58 },
        ];

        let route_optimization =
            base_routes().into_iter().map(RoutePlan::derive).collect();

        let elapsed = started.elapsed().as_secs_f64();
        let metadata = MockMetadata {
            last_updated: iso_now(),
            fetch_time_seconds: (elapsed * 100.0).round() / 100.0,
            data_sources: DataSources { current_aqi: true, openaq: true, weather: true },
        };

        Self {
            current_aqi,
            weekly_trend,
            locations,
            hourly_exposure,
            route_optimization,
            detailed_weather: detailed_weather(),
            metadata,
        }
    }

    /// Write one file per top-level key plus the combined file.
    ///
    /// Files have fixed names and are overwritten on every run.
    pub fn write_all(&self, data_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
        fs::create_dir_all(data_dir).with_context(|| {
            format!("Failed to create data directory {}", data_dir.display())
        })?;

        let written = vec![
            write_json(data_dir, "current_aqi.json", &self.current_aqi)?,
            write_json(data_dir, "weekly_trend.json", &self.weekly_trend)?,
            write_json(data_dir, "locations.json", &self.locations)?,
            write_json(data_dir, "hourly_exposure.json", &self.hourly_exposure)?,
            write_json(data_dir, "route_optimization.json", &self.route_optimization)?,
            write_json(data_dir, "detailed_weather.json", &self.detailed_weather)?,
            write_json(data_dir, "metadata.json", &self.metadata)?,
            write_json(data_dir, "combined_data.json", self)?,
        ];

        info!(
            data_dir = %data_dir.display(),
            files = %written.len(),
            fetch_time_seconds = %self.metadata.fetch_time_seconds,
            "mock_dataset_written"
        );
        Ok(written)
    }
}

fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> anyhow::Result<PathBuf> {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(value)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// The three measured Kathmandu commute routes
fn base_routes() -> Vec<BaseRoute> {
    vec![
        BaseRoute {
            id: "route1".to_string(),
            name: "Home to Office".to_string(),
            start: "Thamel".to_string(),
            end: "New Baneshwor".to_string(),
            distance_km: 6.5,
            avg_pm25: 85,
            avg_pm10: 136.0,
            exposure_time_mins: 39,
            peak_hours_factor: 1.5,
            total_exposure: 331,
        },
        BaseRoute {
            id: "route2".to_string(),
            name: "Office to Gym".to_string(),
            start: "New Baneshwor".to_string(),
            end: "Patan".to_string(),
            distance_km: 4.2,
            avg_pm25: 72,
            avg_pm10: 115.2,
            exposure_time_mins: 25,
            peak_hours_factor: 1.0,
            total_exposure: 180,
        },
        BaseRoute {
            id: "route3".to_string(),
            name: "Weekend Shopping".to_string(),
            start: "Thamel".to_string(),
            end: "Bhatbhateni".to_string(),
            distance_km: 3.8,
            avg_pm25: 90,
            avg_pm10: 144.0,
            exposure_time_mins: 22,
            peak_hours_factor: 1.0,
            total_exposure: 198,
        },
    ]
}

fn detailed_weather() -> DetailedWeather {
    DetailedWeather {
        current_weather: CurrentWeather {
            temperature: 28,
            humidity: 65,
            wind_speed: 8,
            wind_direction: "SE",
            precipitation: 0,
            pressure: 1012,
            conditions: "Partly cloudy",
        },
        correlations: vec![
            WeatherCorrelation {
                parameter: "Temperature",
                correlation: 0.65,
                effect: "Higher temperatures generally increase pollutant concentrations due to increased photochemical reactions",
                impact_level: "High",
            },
            WeatherCorrelation {
                parameter: "Wind Speed",
                correlation: -0.78,
                effect: "Higher wind speeds disperse pollutants, reducing concentrations",
                impact_level: "Very High",
            },
            WeatherCorrelation {
                parameter: "Humidity",
                correlation: -0.42,
                effect: "Higher humidity can reduce some particulate matter, but increase others",
                impact_level: "Medium",
            },
            WeatherCorrelation {
                parameter: "Precipitation",
                correlation: -0.85,
                effect: "Rain washes out particulate matter, significantly improving air quality",
                impact_level: "Very High",
            },
            WeatherCorrelation {
                parameter: "Pressure",
                correlation: 0.32,
                effect: "High pressure systems can trap pollution near the ground",
                impact_level: "Medium",
            },
        ],
        hourly_forecast: vec![
            ForecastSlot { hour: "6:00", temperature: 23, humidity: 75, wind_speed: 5, aqi_forecast: 45 },
            ForecastSlot { hour: "9:00", temperature: 25, humidity: 70, wind_speed: 6, aqi_forecast: 65 },
            ForecastSlot { hour: "12:00", temperature: 28, humidity: 65, wind_speed: 7, aqi_forecast: 85 },
            ForecastSlot { hour: "15:00", temperature: 30, humidity: 60, wind_speed: 8, aqi_forecast: 95 },
            ForecastSlot { hour: "18:00", temperature: 28, humidity: 65, wind_speed: 7, aqi_forecast: 110 },
            ForecastSlot { hour: "21:00", temperature: 25, humidity: 70, wind_speed: 6, aqi_forecast: 90 },
        ],
        seasonal_patterns: vec![
            SeasonalPattern { month: "Jan", avg_temp: 12, avg_humidity: 55, avg_aqi: 180 },
            SeasonalPattern { month: "Feb", avg_temp: 14, avg_humidity: 50, avg_aqi: 160 },
            SeasonalPattern { month: "Mar", avg_temp: 18, avg_humidity: 45, avg_aqi: 150 },
            SeasonalPattern { month: "Apr", avg_temp: 22, avg_humidity: 40, avg_aqi: 120 },
            SeasonalPattern { month: "May", avg_temp: 25, avg_humidity: 55, avg_aqi: 100 },
            SeasonalPattern { month: "Jun", avg_temp: 27, avg_humidity: 70, avg_aqi: 70 },
            SeasonalPattern { month: "Jul", avg_temp: 28, avg_humidity: 85, avg_aqi: 50 },
            SeasonalPattern { month: "Aug", avg_temp: 27, avg_humidity: 80, avg_aqi: 55 },
            SeasonalPattern { month: "Sep", avg_temp: 26, avg_humidity: 75, avg_aqi: 65 },
            SeasonalPattern { month: "Oct", avg_temp: 22, avg_humidity: 60, avg_aqi: 90 },
            SeasonalPattern { month: "Nov", avg_temp: 18, avg_humidity: 50, avg_aqi: 130 },
            SeasonalPattern { month: "Dec", avg_temp: 14, avg_humidity: 55, avg_aqi: 170 },
        ],
        aqi_levels_explanation: vec![
            AqiLevel {
                level: "Good (0-50)",
                description: "Air quality is satisfactory, and air pollution poses little or no risk.",
                health_implications: "None for the general population.",
                color: "#00E400",
            },
            AqiLevel {
                level: "Moderate (51-100)",
                description: "Air quality is acceptable. However, some pollutants may be a concern for a small number of people.",
                health_implications: "Unusually sensitive individuals should consider limiting prolonged outdoor exertion.",
                color: "#FFFF00",
            },
            AqiLevel {
                level: "Unhealthy for Sensitive Groups (101-150)",
                description: "Members of sensitive groups may experience health effects.",
                health_implications: "People with respiratory or heart disease, the elderly and children should limit prolonged outdoor exertion.",
                color: "#FF7E00",
            },
            AqiLevel {
                level: "Unhealthy (151-200)",
                description: "Everyone may begin to experience health effects; members of sensitive groups may experience more serious health effects.",
                health_implications: "People with respiratory or heart disease, the elderly and children should avoid prolonged outdoor exertion; everyone else should limit prolonged outdoor exertion.",
                color: "#FF0000",
            },
            AqiLevel {
                level: "Very Unhealthy (201-300)",
                description: "Health alert: everyone may experience more serious health effects.",
                health_implications: "People with respiratory or heart disease, the elderly and children should avoid any outdoor activity; everyone else should avoid prolonged outdoor exertion.",
                color: "#8F3F97",
            },
            AqiLevel {
                level: "Hazardous (301-500)",
                description: "Health warnings of emergency conditions. The entire population is more likely to be affected.",
                health_implications: "Everyone should avoid all outdoor exertion.",
                color: "#7E0023",
            },
        ],
    }
}
