use crate::views::ViewKind;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// seq 用于丢弃过期的加载结果
    LoadView {
        view: ViewKind,
        seq: u64,
    },
    GetDetail {
        view: ViewKind,
        id: String,
    },
    Stats,
    DepartmentAdd {
        name: String,
    },
    EmployeeStatus {
        id: String,
        status: String,
    },
    LeadStatus {
        id: String,
        status: String,
    },
    Regenerate {
        seed: u64,
    },
    Export {
        path: String,
    },
    Help,
    Quit,
    Unknown(String),
}

pub const HELP_TEXT: &str = "可用命令: filter <关键字|/正则/|clear> | page <n> | dept add <name> | employee status <id> <active|onleave|terminated> | lead status <id> <status> | seed <n> | export <path> | help | quit";

impl FromStr for AppCommand {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(AppCommand::Unknown("".to_string()));
        }

        match parts[0] {
            "dept" | "department" => {
                if parts.get(1) == Some(&"add") {
                    // 名称允许包含空格；空名称交给校验环节报错
                    Ok(AppCommand::DepartmentAdd {
                        name: parts[2..].join(" "),
                    })
                } else {
                    Ok(AppCommand::Unknown("用法: dept add <name>".to_string()))
                }
            }
            "employee" | "emp" => match (parts.get(1), parts.get(2)) {
                (Some(&"status"), Some(id)) => Ok(AppCommand::EmployeeStatus {
                    id: id.to_string(),
                    status: parts[3..].join(" "),
                }),
                _ => Ok(AppCommand::Unknown(
                    "用法: employee status <id> <active|onleave|terminated>".to_string(),
                )),
            },
            "lead" => match (parts.get(1), parts.get(2)) {
                (Some(&"status"), Some(id)) => Ok(AppCommand::LeadStatus {
                    id: id.to_string(),
                    status: parts[3..].join(" "),
                }),
                _ => Ok(AppCommand::Unknown(
                    "用法: lead status <id> <status>".to_string(),
                )),
            },
            "seed" => match parts.get(1).map(|s| s.parse::<u64>()) {
                Some(Ok(seed)) => Ok(AppCommand::Regenerate { seed }),
                Some(Err(_)) => Ok(AppCommand::Unknown(format!(
                    "无效的 seed: {}",
                    parts[1]
                ))),
                None => Ok(AppCommand::Unknown("用法: seed <n>".to_string())),
            },
            "export" => {
                let path = parts[1..].join(" ");
                if path.is_empty() {
                    Ok(AppCommand::Unknown("用法: export <path>".to_string()))
                } else {
                    Ok(AppCommand::Export { path })
                }
            }
            "stats" => Ok(AppCommand::Stats),
            "help" | "h" => Ok(AppCommand::Help),
            "quit" | "q" | "exit" => Ok(AppCommand::Quit),
            _ => Ok(AppCommand::Unknown(format!("未知命令: {}", parts[0]))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> AppCommand {
        AppCommand::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_department_add() {
        assert_eq!(
            parse("dept add Research & Development"),
            AppCommand::DepartmentAdd {
                name: "Research & Development".to_string()
            }
        );
        assert_eq!(
            parse("dept add"),
            AppCommand::DepartmentAdd {
                name: String::new()
            }
        );
        assert!(matches!(parse("dept remove x"), AppCommand::Unknown(_)));
    }

    #[test]
    fn test_parse_status_changes() {
        assert_eq!(
            parse("employee status EMP-0003 on leave"),
            AppCommand::EmployeeStatus {
                id: "EMP-0003".to_string(),
                status: "on leave".to_string()
            }
        );
        assert_eq!(
            parse("lead status LEAD-0001 won"),
            AppCommand::LeadStatus {
                id: "LEAD-0001".to_string(),
                status: "won".to_string()
            }
        );
        assert!(matches!(parse("lead status"), AppCommand::Unknown(_)));
    }

    #[test]
    fn test_parse_seed_and_export() {
        assert_eq!(parse("seed 7"), AppCommand::Regenerate { seed: 7 });
        assert!(matches!(parse("seed x"), AppCommand::Unknown(_)));
        assert!(matches!(parse("seed"), AppCommand::Unknown(_)));
        assert_eq!(
            parse("export out/data.json"),
            AppCommand::Export {
                path: "out/data.json".to_string()
            }
        );
        assert!(matches!(parse("export"), AppCommand::Unknown(_)));
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse("help"), AppCommand::Help);
        assert_eq!(parse("exit"), AppCommand::Quit);
        assert_eq!(parse("stats"), AppCommand::Stats);
        assert_eq!(parse("   "), AppCommand::Unknown(String::new()));
        assert_eq!(parse("frobnicate"), AppCommand::Unknown("未知命令: frobnicate".to_string()));
    }
}
