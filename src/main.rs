use anyhow::Result;

use snmp_usage::collector::{DeviceTarget, UsageCollector};
use snmp_usage::config::AppConfig;
use snmp_usage::formatter::JsonFormatter;
use snmp_usage::vendor::Vendor;

// TODO: опрос списка устройств из файла, а не одного target из окружения

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::load();
    let target = DeviceTarget {
        address: config.get_target(),
        community: config.get_community(),
        vendor_hint: config.get_vendor_hint(),
    };
    let vendor = Vendor::classify(&target.vendor_hint);

    let collector = UsageCollector::new(config.settings.clone());
    let result = collector.collect_usage(&target).await;

    match JsonFormatter::to_json_string(&target, vendor, &result) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Ошибка JSON сериализации: {}", e),
    }

    Ok(())
}
