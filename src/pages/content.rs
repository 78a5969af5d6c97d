//! Static copy shown on the Projects and About pages.

pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub technologies: &'static [&'static str],
}

pub struct Skill {
    pub name: &'static str,
    /// 0 to 100
    pub level: u8,
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "E-Commerce Platform",
        description: "A full-stack e-commerce solution with React, Node.js, and Stripe integration.",
        technologies: &["React", "Node.js", "MongoDB", "Stripe"],
    },
    Project {
        title: "Task Management App",
        description: "A collaborative task manager with real-time updates and team features.",
        technologies: &["Next.js", "TypeScript", "Prisma", "Socket.io"],
    },
    Project {
        title: "Weather Dashboard",
        description: "Weather app with detailed forecasts and interactive maps.",
        technologies: &["Vue.js", "D3.js", "Weather API"],
    },
    Project {
        title: "Portfolio Village",
        description: "This very village! A little mascot walks you to every page.",
        technologies: &["Rust", "ratatui", "tokio"],
    },
];

pub const ABOUT_HEADING: &str = "Hi there!";

pub const ABOUT_PARAGRAPHS: &[&str] = &[
    "I'm a full-stack developer who loves building functional, friendly software. \
     When I'm not coding, I'm exploring new technologies or playing video games.",
    "I care about clean, maintainable code and interfaces that are intuitive and \
     delightful. Every project is a chance to learn something new.",
    "My journey in tech started with curiosity and grew into a passion for \
     solving problems through code, ideally together with a good team.",
];

pub const SKILLS: &[Skill] = &[
    Skill { name: "JavaScript", level: 90 },
    Skill { name: "React/Next.js", level: 85 },
    Skill { name: "TypeScript", level: 80 },
    Skill { name: "UI/UX Design", level: 75 },
    Skill { name: "Node.js", level: 70 },
    Skill { name: "Problem Solving", level: 95 },
];
