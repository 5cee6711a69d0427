//! 交互式感知测试
//!
//! 在终端上逐个样本播放、收集评分并提交，直到会话结束

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::driver::DriverError;
use crate::application::{
    ApplicationError, AudioPlayerPort, PerceptionState, PerceptionTestController,
};
use crate::domain::perception::{OptionSchema, PerceptionSession, Ratings, SCALE_LABELS};

/// 终端输入输出
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    async fn say(&mut self, text: &str) -> std::io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }

    /// 输出提示并读取一行；输入结束时返回 None
    async fn ask(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        self.say(prompt).await?;
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// 量表回答: `-2`..`2`，返回 0 起始的刻度位置
pub fn parse_scale_answer(answer: &str) -> Option<usize> {
    let answer = answer.trim();
    let answer = answer.strip_prefix('+').unwrap_or(answer);
    SCALE_LABELS.iter().position(|label| *label == answer)
}

/// 复选框回答: 以逗号或空白分隔的序号（从 1 开始）或选项名
pub fn parse_checkbox_answer(items: &[String], answer: &str) -> Vec<String> {
    let mut checked: Vec<String> = Vec::new();
    for token in answer
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let item = match token.parse::<usize>() {
            Ok(number) if number >= 1 => items.get(number - 1).cloned(),
            Ok(_) => None,
            Err(_) => Some(token.to_string()),
        };
        if let Some(item) = item {
            if !checked.contains(&item) {
                checked.push(item);
            }
        }
    }
    checked
}

/// 运行一次完整的感知测试
///
/// 输入结束时提前返回；评分不完整时重新提问
pub async fn run_perception_test<R, W>(
    controller: &mut PerceptionTestController,
    player: Arc<dyn AudioPlayerPort>,
    email: &str,
    console: &mut Console<R, W>,
) -> Result<(), DriverError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    controller.submit_email(email).await?;

    loop {
        let session = match controller.state() {
            PerceptionState::InSession(session) | PerceptionState::Finishing(session) => {
                session.clone()
            }
            PerceptionState::Completed => break,
            PerceptionState::AwaitingEmail => {
                return Err(ApplicationError::invalid_state("perception test not started").into())
            }
        };

        present_sample(controller, &player, &session, console).await?;

        loop {
            let Some(ratings) = collect_ratings(session.option_schema(), console).await? else {
                console.say("\nInput closed, stopping the test.\n").await?;
                return Ok(());
            };

            match controller.submit_rating(ratings).await {
                Ok(_) => break,
                Err(err) if err.is_validation() => {
                    console.say(&format!("{}\n", err)).await?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    console
        .say("All samples rated. Thank you for taking part!\n")
        .await?;
    Ok(())
}

async fn present_sample<R, W>(
    controller: &PerceptionTestController,
    player: &Arc<dyn AudioPlayerPort>,
    session: &PerceptionSession,
    console: &mut Console<R, W>,
) -> Result<(), DriverError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    console
        .say(&format!(
            "\n[{}] Sample {}\n",
            session.progress(),
            session.current_sample_base_name()
        ))
        .await?;
    if !session.question_text().trim().is_empty() {
        console.say(session.question_text()).await?;
    }

    // 播放失败不影响评分
    match controller.fetch_sample_audio().await {
        Ok(audio) => {
            if let Err(e) = player.play(&audio, "audio/wav").await {
                tracing::warn!(error = %e, "Failed to play sample");
            }
        }
        Err(e) => tracing::warn!(error = %e, "Failed to fetch sample audio"),
    }
    Ok(())
}

async fn collect_ratings<R, W>(
    schema: &OptionSchema,
    console: &mut Console<R, W>,
) -> Result<Option<Ratings>, DriverError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    match schema {
        OptionSchema::Scale { items } => {
            let mut selections = Vec::with_capacity(items.len());
            for item in items {
                let (low, high) = OptionSchema::scale_labels(item);
                loop {
                    let prompt = format!("{} ({} .. {}) [-2..2]: ", item, low, high);
                    let Some(answer) = console.ask(&prompt).await? else {
                        return Ok(None);
                    };
                    match parse_scale_answer(&answer) {
                        Some(position) => {
                            selections.push((item.clone(), position));
                            break;
                        }
                        None => console.say("Please answer with -2, -1, 0, 1 or 2.\n").await?,
                    }
                }
            }
            Ok(Some(Ratings::Scale(selections)))
        }
        OptionSchema::CheckboxSet { items } => {
            for (idx, item) in items.iter().enumerate() {
                console.say(&format!("  {}) {}\n", idx + 1, item)).await?;
            }
            let Some(answer) = console.ask("Check all that apply: ").await? else {
                return Ok(None);
            };
            Ok(Some(Ratings::Checked(parse_checkbox_answer(items, &answer))))
        }
    }
}
