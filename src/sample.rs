//! Bundled job description and resumes for the `demo` command

use crate::processing::document::CandidateInput;

pub const SAMPLE_JOB_DESCRIPTION: &str = "Senior Data Scientist
We are seeking a Senior Data Scientist to lead our analytics team. The ideal candidate will have extensive experience with machine learning, deep learning, and big data technologies. Responsibilities include developing advanced predictive models, leading data science initiatives, and mentoring junior team members.

Requirements:
- Master's or PhD in Computer Science, Statistics, Mathematics, or related field
- 5+ years of experience in data science
- Expertise in Python, R, and SQL
- Experience with TensorFlow, PyTorch, and scikit-learn
- Strong background in deep learning and neural networks
- Experience with cloud platforms (AWS, GCP, Azure)
- Excellent leadership and communication skills
- Published research in machine learning journals preferred
";

const ALEX_JOHNSON: &str = "Alex Johnson
Email: alex.johnson@email.com
Phone: (555) 123-4567

Senior Data Scientist with 7 years of experience in machine learning and artificial intelligence. PhD in Computer Science from Stanford University. Expert in Python, TensorFlow, and PyTorch. Led multiple successful AI projects resulting in 30% improvement in business metrics. Published researcher with 10+ papers in top-tier ML conferences.

Skills:
- Python
- Machine Learning
- Deep Learning
- TensorFlow
- PyTorch
- SQL
- Statistical Analysis
- Data Visualization
- AWS
- Team Leadership
";

const SARAH_WILLIAMS: &str = "Sarah Williams
Email: sarah.williams@email.com
Phone: (555) 987-6543

Software Engineer with 4 years of experience in web development. Proficient in JavaScript, React, and Node.js. Experience with REST APIs and cloud platforms. Bachelor's degree in Computer Science from MIT. Recently completed online courses in data science and machine learning.

Skills:
- JavaScript
- React
- Node.js
- HTML/CSS
- Git
- AWS
- Basic Python
- Machine Learning (beginner)
";

const MICHAEL_CHEN: &str = "Michael Chen
Email: m.chen@email.com
Phone: (555) 456-7890

Data Scientist with PhD in Statistics and 6 years of industry experience. Expertise in Python, R, and advanced machine learning algorithms. Published research in deep learning applications. Experience with big data technologies like Spark and Hadoop. Led data science teams of 5+ members.

Skills:
- Python
- R
- Machine Learning
- Deep Learning
- PyTorch
- Statistical Modeling
- SQL
- Spark
- Hadoop
- Team Leadership
- Research Publication
";

pub fn sample_resumes() -> Vec<CandidateInput> {
    vec![
        CandidateInput::new("Alex Johnson", ALEX_JOHNSON),
        CandidateInput::new("Sarah Williams", SARAH_WILLIAMS),
        CandidateInput::new("Michael Chen", MICHAEL_CHEN),
    ]
}
