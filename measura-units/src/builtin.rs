//! Built-in unit tables
//!
//! Kinds: length, mass, time, temperature, volume, area, speed, data,
//! fuel_economy. Temperature and fuel economy need formula edges; the
//! gas mark edges need the kitchen procedures to be registered.

use crate::config::{KindConfig, UnitsConfig};

const INCH_CM: f64 = 2.54;
const POUND_G: f64 = 453.59237;
const MILE_KM: f64 = 1.609344;
const US_GALLON_L: f64 = 3.785411784;
const IMPERIAL_GALLON_L: f64 = 4.54609;
/// Mean Gregorian year
const YEAR_DAYS: f64 = 365.2425;

impl UnitsConfig {
    /// The default tables, with default settings
    pub fn builtin() -> Self {
        UnitsConfig::new()
            .with_kind(length_units())
            .with_kind(mass_units())
            .with_kind(time_units())
            .with_kind(temperature_units())
            .with_kind(volume_units())
            .with_kind(area_units())
            .with_kind(speed_units())
            .with_kind(data_units())
            .with_kind(fuel_economy_units())
    }
}

fn length_units() -> KindConfig {
    KindConfig::new("length")
        // SI
        .unit("m", &["meter", "meters", "metre", "metres"])
        .unit("km", &["kilometer", "kilometers", "kilometre", "kilometres"])
        .unit("cm", &["centimeter", "centimeters", "centimetre", "centimetres"])
        .unit("mm", &["millimeter", "millimeters", "millimetre", "millimetres"])
        .unit("um", &["μm", "micrometer", "micrometers", "micron", "microns"])
        .unit("nm", &["nanometer", "nanometers"])
        // Imperial/US
        .unit("in", &["inch", "inches", "\"", "''"])
        .unit("ft", &["foot", "feet", "'"])
        .unit("yd", &["yard", "yards"])
        .unit("mi", &["mile", "miles"])
        .unit("nmi", &["nautical mile", "nautical miles"])
        .factor("km_to_m", 1000.0)
        .factor("m_to_cm", 100.0)
        .factor("cm_to_mm", 10.0)
        .factor("mm_to_um", 1000.0)
        .factor("um_to_nm", 1000.0)
        .factor("ft_to_in", 12.0)
        .factor("yd_to_ft", 3.0)
        .factor("mi_to_yd", 1760.0)
        .factor("in_to_cm", INCH_CM)
        .factor("nmi_to_m", 1852.0)
}

fn mass_units() -> KindConfig {
    KindConfig::new("mass")
        .unit("kg", &["kilogram", "kilograms"])
        .unit("g", &["gram", "grams"])
        .unit("mg", &["milligram", "milligrams"])
        .unit("ug", &["μg", "mcg", "microgram", "micrograms"])
        .unit("t", &["tonne", "tonnes", "metric ton"])
        .unit("lb", &["lbs", "pound", "pounds"])
        .unit("oz", &["ounce", "ounces"])
        .unit("st", &["stone", "stones"])
        .unit("ton", &["tons", "short ton"])
        .unit("lton", &["long ton"])
        .unit("ct", &["carat", "carats"])
        .factor("kg_to_g", 1000.0)
        .factor("g_to_mg", 1000.0)
        .factor("mg_to_ug", 1000.0)
        .factor("t_to_kg", 1000.0)
        .factor("lb_to_oz", 16.0)
        .factor("lb_to_g", POUND_G)
        .factor("st_to_lb", 14.0)
        .factor("ton_to_lb", 2000.0)
        .factor("lton_to_lb", 2240.0)
        .factor("ct_to_mg", 200.0)
}

fn time_units() -> KindConfig {
    KindConfig::new("time")
        .unit("s", &["sec", "second", "seconds"])
        .unit("ms", &["millisecond", "milliseconds"])
        .unit("us", &["μs", "microsecond", "microseconds"])
        .unit("ns", &["nanosecond", "nanoseconds"])
        .unit("min", &["minute", "minutes"])
        .unit("h", &["hr", "hour", "hours"])
        .unit("d", &["day", "days"])
        .unit("wk", &["week", "weeks"])
        .unit("mo", &["month", "months"])
        .unit("yr", &["year", "years"])
        .factor("min_to_s", 60.0)
        .factor("h_to_min", 60.0)
        .factor("d_to_h", 24.0)
        .factor("wk_to_d", 7.0)
        .factor("s_to_ms", 1000.0)
        .factor("ms_to_us", 1000.0)
        .factor("us_to_ns", 1000.0)
        // averages
        .factor("yr_to_d", YEAR_DAYS)
        .factor("mo_to_d", YEAR_DAYS / 12.0)
}

fn temperature_units() -> KindConfig {
    KindConfig::new("temperature")
        .unit("K", &["kelvin"])
        .unit("C", &["°C", "celsius", "centigrade"])
        .unit("F", &["°F", "fahrenheit"])
        .unit("R", &["°R", "rankine"])
        .unit("gas_mark", &["gas mark", "gasmark", "mark"])
        .formula("C_to_K", "celsius_to_kelvin")
        .formula("K_to_C", "kelvin_to_celsius")
        .formula("C_to_F", "celsius_to_fahrenheit")
        .formula("F_to_C", "fahrenheit_to_celsius")
        .formula("F_to_K", "fahrenheit_to_kelvin")
        .formula("K_to_F", "kelvin_to_fahrenheit")
        .factor("K_to_R", 1.8)
        .special("F_to_gas_mark", "fahrenheit_to_gas_mark")
        .special("gas_mark_to_F", "gas_mark_to_fahrenheit")
}

fn volume_units() -> KindConfig {
    KindConfig::new("volume")
        .unit("m3", &["m³", "cubic meter", "cubic meters"])
        .unit("L", &["l", "liter", "liters", "litre", "litres"])
        .unit("mL", &["ml", "milliliter", "milliliters", "millilitre", "millilitres"])
        // US customary
        .unit("gal", &["gallon", "gallons"])
        .unit("qt", &["quart", "quarts"])
        .unit("pt", &["pint", "pints"])
        .unit("cup", &["cups"])
        .unit("floz", &["fl oz", "fluid ounce", "fluid ounces"])
        .unit("tbsp", &["tablespoon", "tablespoons"])
        .unit("tsp", &["teaspoon", "teaspoons"])
        .unit("gal_imp", &["imperial gallon", "imperial gallons"])
        .factor("m3_to_L", 1000.0)
        .factor("L_to_mL", 1000.0)
        .factor("gal_to_L", US_GALLON_L)
        .factor("gal_to_qt", 4.0)
        .factor("qt_to_pt", 2.0)
        .factor("pt_to_cup", 2.0)
        .factor("cup_to_floz", 8.0)
        .factor("floz_to_tbsp", 2.0)
        .factor("tbsp_to_tsp", 3.0)
        .factor("gal_imp_to_L", IMPERIAL_GALLON_L)
}

fn area_units() -> KindConfig {
    KindConfig::new("area")
        .unit("m2", &["m²", "sq m", "square meter", "square meters"])
        .unit("km2", &["km²", "sq km", "square kilometer", "square kilometers"])
        .unit("cm2", &["cm²", "sq cm", "square centimeter", "square centimeters"])
        .unit("ha", &["hectare", "hectares"])
        .unit("acre", &["acres", "ac"])
        .unit("ft2", &["ft²", "sq ft", "square foot", "square feet"])
        .unit("in2", &["in²", "sq in", "square inch", "square inches"])
        .unit("yd2", &["yd²", "sq yd", "square yard", "square yards"])
        .unit("mi2", &["mi²", "sq mi", "square mile", "square miles"])
        .factor("km2_to_m2", 1_000_000.0)
        .factor("m2_to_cm2", 10_000.0)
        .factor("ha_to_m2", 10_000.0)
        .factor("acre_to_ft2", 43_560.0)
        .factor("ft2_to_in2", 144.0)
        .factor("yd2_to_ft2", 9.0)
        .factor("mi2_to_acre", 640.0)
        .factor("in2_to_cm2", INCH_CM * INCH_CM)
}

fn speed_units() -> KindConfig {
    KindConfig::new("speed")
        .unit("m_per_s", &["m/s", "mps", "meters per second"])
        .unit("km_per_h", &["km/h", "kph", "kmh", "kilometers per hour"])
        .unit("mph", &["mi/h", "miles per hour"])
        .unit("kn", &["kt", "knot", "knots"])
        .unit("ft_per_s", &["ft/s", "fps", "feet per second"])
        .factor("m_per_s_to_km_per_h", 3.6)
        .factor("mph_to_km_per_h", MILE_KM)
        .factor("kn_to_km_per_h", 1.852)
        .factor("ft_per_s_to_m_per_s", 0.3048)
}

fn data_units() -> KindConfig {
    KindConfig::new("data")
        .unit("bit", &["bits"])
        .unit("byte", &["B", "bytes"])
        .unit("kB", &["kilobyte", "kilobytes"])
        .unit("MB", &["megabyte", "megabytes"])
        .unit("GB", &["gigabyte", "gigabytes"])
        .unit("TB", &["terabyte", "terabytes"])
        // Binary units (IEC)
        .unit("KiB", &["kibibyte", "kibibytes"])
        .unit("MiB", &["mebibyte", "mebibytes"])
        .unit("GiB", &["gibibyte", "gibibytes"])
        .unit("TiB", &["tebibyte", "tebibytes"])
        .factor("byte_to_bit", 8.0)
        .factor("kB_to_byte", 1000.0)
        .factor("MB_to_kB", 1000.0)
        .factor("GB_to_MB", 1000.0)
        .factor("TB_to_GB", 1000.0)
        .factor("KiB_to_byte", 1024.0)
        .factor("MiB_to_KiB", 1024.0)
        .factor("GiB_to_MiB", 1024.0)
        .factor("TiB_to_GiB", 1024.0)
}

fn fuel_economy_units() -> KindConfig {
    KindConfig::new("fuel_economy")
        .unit("km_per_l", &["km/L", "km/l", "kmpl"])
        .unit("mpg", &["miles per gallon"])
        .unit("mpg_imp", &["imperial mpg"])
        .unit("l_per_100km", &["L/100km", "l/100km"])
        .factor("mpg_to_km_per_l", MILE_KM / US_GALLON_L)
        .factor("mpg_imp_to_km_per_l", MILE_KM / IMPERIAL_GALLON_L)
        // Reciprocal scales: formulas both ways, never chained
        .formula("km_per_l_to_l_per_100km", "hundred_over")
        .formula("l_per_100km_to_km_per_l", "hundred_over")
        .formula("mpg_to_l_per_100km", "mpg_l_per_100km")
        .formula("l_per_100km_to_mpg", "mpg_l_per_100km")
}
