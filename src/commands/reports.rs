//! Static texts: the command reference and the placeholder system reports.
//!
//! The reports are illustrative only; nothing here inspects the host.

use super::command::Report;

pub(crate) fn help(name: &str, version: &str) -> String {
    format!(
        "{name} v{version} commands:\n\
         \x20 status                          show OS status\n\
         \x20 uptime                          time since boot\n\
         \x20 services                        list running services\n\
         \x20 echo <text>                     print text\n\
         \x20 date                            current date and time\n\
         \x20 clear                           clear the log\n\
         \x20 memory | cpu | disk | network   system reports\n\
         \x20 log                             recent commands\n\
         \x20 add_task <name>                 register a task\n\
         \x20 kill_task <id>                  terminate a task\n\
         \x20 prioritize_task <id> <priority> change task priority\n\
         \x20 list_tasks                      list tasks\n\
         \x20 run_task <seconds> <name>       run a background task\n\
         \x20 help                            this text\n\
         \x20 exit | quit                     shut down and leave"
    )
}

pub(crate) fn report(kind: Report) -> &'static str {
    match kind {
        Report::Memory => {
            "Memory Usage:\n  Total: 8192 MB\n  Used: 3276 MB\n  Free: 4916 MB"
        }
        Report::Cpu => "CPU Usage:\n  Cores: 4\n  Load: 23%\n  Temperature: 45°C",
        Report::Disk => "Disk Usage:\n  Total: 256 GB\n  Used: 120 GB\n  Free: 136 GB",
        Report::Network => {
            "Network Status:\n  Interface: eth0\n  IP: 192.168.1.10\n  Sent: 1.2 GB\n  Received: 3.4 GB"
        }
    }
}
