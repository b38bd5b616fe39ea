use crate::category::Category;

pub const PENETRATION_TESTING: &[&str] = &[
    "https://github.com/swisskyrepo/PayloadsAllTheThings",
    "https://book.hacktricks.xyz/",
    "https://pentestmonkey.net/cheat-sheet",
    "https://highon.coffee/blog/penetration-testing-tools-cheat-sheet/",
    "https://www.sans.org/posters/",
];

pub const LINUX_COMMANDS: &[&str] = &[
    "https://www.linuxtrainingacademy.com/linux-commands-cheat-sheet/",
    "https://cheatography.com/davechild/cheat-sheets/linux-command-line/",
    "https://www.commandlinefu.com/commands/browse",
    "https://github.com/LeCoupa/awesome-cheatsheets/blob/master/languages/bash.sh",
];

pub const NMAP_COMMANDS: &[&str] = &[
    "https://nmap.org/book/man-examples.html",
    "https://www.cyberciti.biz/security/nmap-command-examples-tutorials/",
    "https://hackertarget.com/nmap-cheatsheet-a-quick-reference-guide/",
];

pub const BASH_SCRIPTS: &[&str] = &[
    "https://github.com/topics/cybersecurity-scripts",
    "https://github.com/topics/penetration-testing-scripts",
    "https://github.com/topics/bash-scripts",
];

/// Built-in source list of a category. Guides have none.
pub fn default_sources(category: Category) -> &'static [&'static str] {
    match category {
        Category::PenetrationTesting => PENETRATION_TESTING,
        Category::LinuxCommands => LINUX_COMMANDS,
        Category::NmapCommands => NMAP_COMMANDS,
        Category::CybersecurityGuides => &[],
        Category::BashScripts => BASH_SCRIPTS,
    }
}
